//! Cluster secret store collaborator.
//!
//! Abstracts the Kubernetes `Secret` API down to the four calls the copy
//! reconciler needs. There is no partial-field update: replacing a secret
//! means delete, then create.

#[cfg(feature = "kubernetes")]
mod kube;
mod memory;

use std::collections::BTreeMap;

use crate::error::Result;

#[cfg(feature = "kubernetes")]
pub use self::kube::KubeSecrets;
pub use memory::{ClusterCall, MemoryCluster};

/// Key to payload map of one secret.
pub type SecretData = BTreeMap<String, Vec<u8>>;

/// Cluster-native secret store.
pub trait ClusterStore {
    /// Whether a secret named `name` exists.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Current key/payload map of a secret.
    fn read(&self, name: &str) -> Result<SecretData>;

    /// Create a secret with the given type and data.
    fn write(&self, name: &str, secret_type: &str, data: &SecretData) -> Result<()>;

    /// Delete a secret.
    fn delete(&self, name: &str) -> Result<()>;
}

impl<C: ClusterStore + ?Sized> ClusterStore for &C {
    fn exists(&self, name: &str) -> Result<bool> {
        (**self).exists(name)
    }

    fn read(&self, name: &str) -> Result<SecretData> {
        (**self).read(name)
    }

    fn write(&self, name: &str, secret_type: &str, data: &SecretData) -> Result<()> {
        (**self).write(name, secret_type, data)
    }

    fn delete(&self, name: &str) -> Result<()> {
        (**self).delete(name)
    }
}

impl<C: ClusterStore + ?Sized> ClusterStore for Box<C> {
    fn exists(&self, name: &str) -> Result<bool> {
        (**self).exists(name)
    }

    fn read(&self, name: &str) -> Result<SecretData> {
        (**self).read(name)
    }

    fn write(&self, name: &str, secret_type: &str, data: &SecretData) -> Result<()> {
        (**self).write(name, secret_type, data)
    }

    fn delete(&self, name: &str) -> Result<()> {
        (**self).delete(name)
    }
}
