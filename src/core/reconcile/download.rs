//! Download: vault secrets onto local disk.

use std::path::PathBuf;

use tracing::{info, info_span, Span};

use crate::core::file::File;
use crate::core::manifest::Manifest;
use crate::core::path;
use crate::core::vault::Vault;
use crate::error::Result;

/// Pulls manifest entries out of the vault into [`File`] containers.
#[derive(Debug)]
pub struct Downloader<V> {
    vault: V,
    output_dir: PathBuf,
    span: Span,
    files: Vec<File>,
}

impl<V: Vault> Downloader<V> {
    pub fn new(vault: V, output_dir: impl Into<PathBuf>, parent: &Span) -> Self {
        let output_dir = output_dir.into();
        let span = info_span!(parent: parent, "download", output_dir = %output_dir.display());
        Self {
            vault,
            output_dir,
            span,
            files: Vec::new(),
        }
    }

    /// Read every entry from the vault, unzipping where the manifest says so.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when a path or key holds no data and
    /// `Error::Payload` when a zipped payload can't be decoded.
    pub fn prepare(&mut self, manifest: &Manifest) -> Result<()> {
        let span = self.span.clone();
        let _guard = span.enter();

        let vault = &self.vault;
        let files = &mut self.files;
        files.clear();

        manifest.walk(|item| {
            let path = path::compose(item.entry, item.group_path);
            let _entry =
                info_span!("entry", group = %item.group, name = %item.entry.name, path = %path)
                    .entered();

            let payload = vault.read(&path, item.entry.storage_key())?;
            let mut file = File::new(item.group, item.secret_type, item.entry.clone(), payload);
            if item.entry.zip {
                file.unzip()?;
            }
            files.push(file);
            Ok(())
        })?;

        info!(files = self.files.len(), "download prepared");
        Ok(())
    }

    /// Write every downloaded container under the output directory.
    pub fn execute(&self, dry_run: bool) -> Result<()> {
        let _guard = self.span.enter();

        for file in &self.files {
            if dry_run {
                info!(
                    path = %file.file_path(&self.output_dir).display(),
                    "dry-run: skipping file write"
                );
                continue;
            }
            file.write(&self.output_dir)?;
        }
        Ok(())
    }

    /// Downloaded containers, in manifest order.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Consume the reconciler, keeping the downloaded containers.
    pub fn into_files(self) -> Vec<File> {
        self.files
    }
}
