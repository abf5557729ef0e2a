//! Manifest model.
//!
//! A manifest maps group names to a storage path and a list of entries:
//!
//! ```yaml
//! secrets:
//!   db:
//!     path: secret/data/app
//!     type: Opaque
//!     data:
//!       - name: password
//!         extension: txt
//!         zip: true
//!       - name: user
//!         extension: txt
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ManifestError, Result, ValidationError};

/// Parsed manifest, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Groups keyed by name; sorted, so traversal order is deterministic.
    pub secrets: BTreeMap<String, Group>,
}

/// A named bundle of entries sharing one storage path and one secret type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Vault path prefix.
    pub path: String,
    /// Kubernetes secret type (e.g. `Opaque`); empty means cluster default.
    #[serde(rename = "type", default)]
    pub secret_type: String,
    /// Entries of this group.
    #[serde(default)]
    pub data: Vec<Entry>,
}

/// One secret: one file on disk, one field at a vault path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub extension: String,
    /// Compress and encode the payload in the vault.
    #[serde(default)]
    pub zip: bool,
    /// Append `name` to the group path.
    #[serde(default)]
    pub name_as_sub_path: bool,
    /// Storage key override, defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Read the upload payload from this environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_env: Option<String>,
}

impl Entry {
    /// Create an entry with defaults for every optional field.
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            ..Self::default()
        }
    }

    /// Field name used inside the vault path.
    pub fn storage_key(&self) -> &str {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => &self.name,
        }
    }

    /// Environment variable to source the payload from, if any.
    pub fn env_source(&self) -> Option<&str> {
        self.from_env.as_deref().filter(|var| !var.is_empty())
    }
}

/// Borrowed view of one entry and its group, handed to traversal handlers.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a> {
    pub group: &'a str,
    pub group_path: &'a str,
    pub secret_type: &'a str,
    pub entry: &'a Entry,
}

impl Manifest {
    /// Load and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Read` if the file can't be read,
    /// `ManifestError::Parse` on malformed YAML or missing required fields,
    /// and `ValidationError` on invalid entries.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading manifest");

        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse and validate a manifest from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, origin: &Path) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(text).map_err(|source| ManifestError::Parse {
            path: PathBuf::from(origin),
            source,
        })?;
        manifest.validate()?;

        debug!(groups = manifest.secrets.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Check entry names.
    ///
    /// Names end up in file names (`<group>.<name>.<extension>`) and vault
    /// paths, so they can't be empty or contain a path separator.
    pub fn validate(&self) -> Result<()> {
        for (group, secrets) in &self.secrets {
            for entry in &secrets.data {
                let reason = if entry.name.is_empty() {
                    Some("name is empty")
                } else if entry.name.contains('/') || entry.name.contains('\\') {
                    Some("name contains a path separator")
                } else {
                    None
                };

                if let Some(reason) = reason {
                    return Err(ValidationError::InvalidEntryName {
                        group: group.clone(),
                        name: entry.name.clone(),
                        reason,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Visit every entry in order, stopping at the first error.
    pub fn walk<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(EntryRef<'_>) -> Result<()>,
    {
        for (group, secrets) in &self.secrets {
            for entry in &secrets.data {
                handler(EntryRef {
                    group,
                    group_path: &secrets.path,
                    secret_type: &secrets.secret_type,
                    entry,
                })?;
            }
        }
        Ok(())
    }

    /// Total number of entries across groups.
    pub fn len(&self) -> usize {
        self.secrets.values().map(|g| g.data.len()).sum()
    }

    /// Whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
