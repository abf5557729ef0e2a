//! Entry container.
//!
//! One secret's payload plus the naming metadata needed to place it on disk
//! as `<group>.<name>.<extension>`.

use std::path::{Path, PathBuf};

use tracing::{info, info_span, trace, Span};

use crate::core::codec;
use crate::core::fs;
use crate::core::manifest::Entry;
use crate::error::{Error, Result};

/// In-memory secret payload with its naming metadata.
#[derive(Debug, Clone)]
pub struct File {
    group: String,
    secret_type: String,
    properties: Entry,
    payload: Vec<u8>,
    span: Span,
}

impl File {
    /// Create a container. The payload may be empty until [`File::read`].
    pub fn new(
        group: impl Into<String>,
        secret_type: impl Into<String>,
        properties: Entry,
        payload: Vec<u8>,
    ) -> Self {
        let group = group.into();
        let span = info_span!(
            "file",
            group = %group,
            name = %properties.name,
            extension = %properties.extension
        );
        Self {
            group,
            secret_type: secret_type.into(),
            properties,
            payload,
            span,
        }
    }

    /// Group (and Kubernetes secret) name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Kubernetes secret type of the group.
    pub fn secret_type(&self) -> &str {
        &self.secret_type
    }

    /// Manifest entry this container was built from.
    pub fn properties(&self) -> &Entry {
        &self.properties
    }

    /// Current payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the container, keeping the payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// File name, `<group>.<name>.<extension>`.
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.group, self.properties.name, self.properties.extension
        )
    }

    /// Full path of this container under `base_dir`.
    pub fn file_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.file_name())
    }

    /// Load the payload from `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` if the file doesn't exist.
    pub fn read(&mut self, base_dir: &Path) -> Result<()> {
        let _guard = self.span.enter();
        let path = self.file_path(base_dir);

        self.payload = fs::read(&path)?;
        info!(path = %path.display(), bytes = self.payload.len(), "read file content");
        trace!(payload = %String::from_utf8_lossy(&self.payload), "payload");
        Ok(())
    }

    /// Persist the payload under `base_dir` with owner-only permissions.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Io` on filesystem failure.
    pub fn write(&self, base_dir: &Path) -> Result<()> {
        let _guard = self.span.enter();
        let path = self.file_path(base_dir);

        info!(path = %path.display(), bytes = self.payload.len(), "writing file content");
        fs::write_private(&path, &self.payload)
    }

    /// Compress and encode the payload in place.
    pub fn zip(&mut self) -> Result<()> {
        let _guard = self.span.enter();
        info!(bytes = self.payload.len(), "zipping payload");

        let encoded = codec::zip(&self.payload).map_err(|source| self.codec_error(source))?;
        self.payload = encoded.into_bytes();
        Ok(())
    }

    /// Decode and decompress the payload in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::Payload` if the payload isn't a valid encoded stream.
    pub fn unzip(&mut self) -> Result<()> {
        let _guard = self.span.enter();
        info!(bytes = self.payload.len(), "unzipping payload");

        self.payload = codec::unzip(&self.payload).map_err(|source| self.codec_error(source))?;
        Ok(())
    }

    fn codec_error(&self, source: crate::error::CodecError) -> Error {
        Error::Payload {
            group: self.group.clone(),
            name: self.properties.name.clone(),
            source,
        }
    }
}
