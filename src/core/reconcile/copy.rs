//! Copy: downloaded secrets into the cluster store.
//!
//! Containers are grouped by group name, which is also the destination secret
//! name. A secret is only rewritten when it's missing or its data differs;
//! rewriting an existing one means delete, then create.

use std::collections::BTreeMap;

use tracing::{debug, info, info_span, Span};

use crate::core::cluster::{ClusterStore, SecretData};
use crate::core::diff::SecretDiff;
use crate::core::file::File;
use crate::error::{Result, ValidationError};

/// A secret that has to be (re)created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSecret {
    pub secret_type: String,
    pub data: SecretData,
    /// Whether the destination existed during `prepare`.
    pub existed: bool,
}

/// Reconciles downloaded containers into cluster secrets.
#[derive(Debug)]
pub struct Copier<C> {
    cluster: C,
    files: Vec<File>,
    span: Span,
    pending: BTreeMap<String, PendingSecret>,
}

impl<C: ClusterStore> Copier<C> {
    pub fn new(cluster: C, files: Vec<File>, parent: &Span) -> Self {
        let span = info_span!(parent: parent, "copy", files = files.len());
        Self {
            cluster,
            files,
            span,
            pending: BTreeMap::new(),
        }
    }

    /// Compare each group against the cluster and collect what's out of date.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DuplicateKey` when two entries of a group
    /// share a storage key, or the cluster store's error.
    pub fn prepare(&mut self) -> Result<()> {
        let _guard = self.span.enter();
        self.pending.clear();

        let mut groups: BTreeMap<&str, (&str, SecretData)> = BTreeMap::new();
        for file in &self.files {
            let (_, data) = groups
                .entry(file.group())
                .or_insert_with(|| (file.secret_type(), SecretData::new()));

            let key = file.properties().storage_key();
            if data.contains_key(key) {
                return Err(ValidationError::DuplicateKey {
                    group: file.group().to_string(),
                    key: key.to_string(),
                    path: file.group().to_string(),
                }
                .into());
            }
            data.insert(key.to_string(), file.payload().to_vec());
        }

        for (name, (secret_type, data)) in groups {
            let _secret = info_span!("secret", name = %name).entered();

            let existed = self.cluster.exists(name)?;
            if existed {
                let current = self.cluster.read(name)?;
                let diff = SecretDiff::compute(&data, &current);
                if diff.is_synced() {
                    info!("secret is already up to date");
                    continue;
                }
                for change in diff.changes() {
                    debug!(key = %change.key(), status = ?change.status(), "key differs");
                }
            } else {
                info!("secret is not found in cluster");
            }

            self.pending.insert(
                name.to_string(),
                PendingSecret {
                    secret_type: secret_type.to_string(),
                    data,
                    existed,
                },
            );
        }

        info!(pending = self.pending.len(), "copy prepared");
        Ok(())
    }

    /// Recreate every pending secret.
    pub fn execute(&self, dry_run: bool) -> Result<()> {
        let _guard = self.span.enter();

        for (name, secret) in &self.pending {
            if dry_run {
                info!(secret = %name, "dry-run: skipping secret write");
                continue;
            }
            if secret.existed {
                self.cluster.delete(name)?;
            }
            self.cluster.write(name, &secret.secret_type, &secret.data)?;
            info!(secret = %name, keys = secret.data.len(), "copied to cluster");
        }
        Ok(())
    }

    /// Secrets to be written, by name.
    pub fn pending(&self) -> &BTreeMap<String, PendingSecret> {
        &self.pending
    }
}
