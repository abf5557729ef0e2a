//! Upload: local files or environment variables into the vault.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, Span};

use crate::core::file::File;
use crate::core::manifest::{EntryRef, Manifest};
use crate::core::path;
use crate::core::vault::Vault;
use crate::error::{Error, Result, ValidationError};

/// Vault path to the fields written there.
pub type Aggregate = BTreeMap<String, BTreeMap<String, String>>;

/// Pushes manifest entries into the vault, one write per distinct path.
#[derive(Debug)]
pub struct Uploader<V> {
    vault: V,
    input_dir: PathBuf,
    span: Span,
    secrets: Aggregate,
}

impl<V: Vault> Uploader<V> {
    pub fn new(vault: V, input_dir: impl Into<PathBuf>, parent: &Span) -> Self {
        let input_dir = input_dir.into();
        let span = info_span!(parent: parent, "upload", input_dir = %input_dir.display());
        Self {
            vault,
            input_dir,
            span,
            secrets: Aggregate::new(),
        }
    }

    /// Load every entry and group the payloads by vault path.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnvVar` for an unset `fromEnv` variable,
    /// `FileError::NotFound` for a missing input file and
    /// `ValidationError::DuplicateKey` when two entries share a key at the
    /// same path.
    pub fn prepare(&mut self, manifest: &Manifest) -> Result<()> {
        let span = self.span.clone();
        let _guard = span.enter();

        let input_dir = &self.input_dir;
        let secrets = &mut self.secrets;
        secrets.clear();

        manifest.walk(|item| {
            let path = path::compose(item.entry, item.group_path);
            let _entry =
                info_span!("entry", group = %item.group, name = %item.entry.name, path = %path)
                    .entered();

            let payload = load(item, input_dir)?;
            let key = item.entry.storage_key();

            let fields = secrets.entry(path.clone()).or_default();
            if fields.contains_key(key) {
                return Err(ValidationError::DuplicateKey {
                    group: item.group.to_string(),
                    key: key.to_string(),
                    path,
                }
                .into());
            }
            debug!(key = %key, bytes = payload.len(), "staged payload");
            fields.insert(key.to_string(), payload);
            Ok(())
        })?;

        info!(paths = self.secrets.len(), "upload prepared");
        Ok(())
    }

    /// Write each aggregated path to the vault.
    pub fn execute(&self, dry_run: bool) -> Result<()> {
        let _guard = self.span.enter();

        for (path, fields) in &self.secrets {
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            if dry_run {
                info!(path = %path, keys = ?keys, "dry-run: skipping vault write");
                continue;
            }
            self.vault.write(path, fields)?;
            info!(path = %path, keys = ?keys, "uploaded to vault");
        }
        Ok(())
    }

    /// Prepared writes, by vault path.
    pub fn secrets(&self) -> &Aggregate {
        &self.secrets
    }
}

fn load(item: EntryRef<'_>, input_dir: &Path) -> Result<String> {
    let mut file = match item.entry.env_source() {
        Some(var) => {
            let value = std::env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::MissingEnvVar {
                    group: item.group.to_string(),
                    name: item.entry.name.clone(),
                    var: var.to_string(),
                })?;
            debug!(var = %var, "payload from environment");
            File::new(item.group, item.secret_type, item.entry.clone(), value.into_bytes())
        }
        None => {
            let mut file = File::new(item.group, item.secret_type, item.entry.clone(), Vec::new());
            file.read(input_dir)?;
            file
        }
    };

    if item.entry.zip {
        file.zip()?;
    }

    String::from_utf8(file.into_payload()).map_err(|_| {
        ValidationError::NonUtf8Payload {
            group: item.group.to_string(),
            name: item.entry.name.clone(),
        }
        .into()
    })
}
