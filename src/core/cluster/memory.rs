//! In-memory cluster store, recording mutating calls.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{ClusterStore, SecretData};
use crate::error::{Result, StoreError};

/// A mutating call made against [`MemoryCluster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCall {
    Write {
        name: String,
        secret_type: String,
        data: SecretData,
    },
    Delete {
        name: String,
    },
}

/// Cluster store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryCluster {
    secrets: RefCell<BTreeMap<String, (String, SecretData)>>,
    calls: RefCell<Vec<ClusterCall>>,
}

impl MemoryCluster {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a secret without recording a call.
    pub fn insert(&self, name: &str, secret_type: &str, data: SecretData) {
        self.secrets
            .borrow_mut()
            .insert(name.to_string(), (secret_type.to_string(), data));
    }

    /// Type and data of a stored secret.
    pub fn get(&self, name: &str) -> Option<(String, SecretData)> {
        self.secrets.borrow().get(name).cloned()
    }

    /// Mutating calls so far, in order.
    pub fn calls(&self) -> Vec<ClusterCall> {
        self.calls.borrow().clone()
    }
}

impl ClusterStore for MemoryCluster {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.secrets.borrow().contains_key(name))
    }

    fn read(&self, name: &str) -> Result<SecretData> {
        self.secrets
            .borrow()
            .get(name)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| StoreError::Cluster(format!("secret '{name}' not found")).into())
    }

    fn write(&self, name: &str, secret_type: &str, data: &SecretData) -> Result<()> {
        if self.secrets.borrow().contains_key(name) {
            return Err(StoreError::Cluster(format!("secret '{name}' already exists")).into());
        }
        self.calls.borrow_mut().push(ClusterCall::Write {
            name: name.to_string(),
            secret_type: secret_type.to_string(),
            data: data.clone(),
        });
        self.insert(name, secret_type, data.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(ClusterCall::Delete {
            name: name.to_string(),
        });
        self.secrets
            .borrow_mut()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::Cluster(format!("secret '{name}' not found")).into())
    }
}
