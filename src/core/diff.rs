//! Secret diff.
//!
//! Key-level comparison between the data downloaded from the vault and the
//! data currently held by a cluster secret.

use std::collections::BTreeSet;

use crate::core::cluster::SecretData;

/// Sync state of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Present on both sides with byte-identical values.
    Synced,
    /// Present on both sides with different values.
    Modified,
    /// Present in the vault data only.
    VaultOnly,
    /// Present in the cluster secret only.
    ClusterOnly,
}

/// A single key of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    key: String,
    status: EntryStatus,
}

impl DiffEntry {
    pub fn new(key: String, status: EntryStatus) -> Self {
        Self { key, status }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn status(&self) -> EntryStatus {
        self.status
    }

    pub fn is_synced(&self) -> bool {
        self.status == EntryStatus::Synced
    }
}

/// Full diff of one secret, entries sorted by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDiff {
    entries: Vec<DiffEntry>,
}

impl SecretDiff {
    /// Compare vault data against the current cluster data.
    pub fn compute(vault: &SecretData, cluster: &SecretData) -> Self {
        let keys: BTreeSet<&String> = vault.keys().chain(cluster.keys()).collect();

        let entries = keys
            .into_iter()
            .map(|key| {
                let status = match (vault.get(key), cluster.get(key)) {
                    (Some(v), Some(c)) if v == c => EntryStatus::Synced,
                    (Some(_), Some(_)) => EntryStatus::Modified,
                    (Some(_), None) => EntryStatus::VaultOnly,
                    (None, _) => EntryStatus::ClusterOnly,
                };
                DiffEntry::new(key.clone(), status)
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    /// Entries that are not synced.
    pub fn changes(&self) -> Vec<&DiffEntry> {
        self.entries.iter().filter(|e| !e.is_synced()).collect()
    }

    /// Whether both sides hold the same keys with the same values.
    pub fn is_synced(&self) -> bool {
        self.entries.iter().all(DiffEntry::is_synced)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
