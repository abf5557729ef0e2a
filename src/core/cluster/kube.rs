//! Kubernetes secret store.
//!
//! Enable with `--features kubernetes` (on by default).
//!
//! The kube client is async; a private current-thread runtime drives each
//! call to completion so the reconcilers stay blocking and sequential.

use std::path::{Path, PathBuf};

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use kube::api::{Api, DeleteParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::{ClusterStore, SecretData};
use crate::core::fs;
use crate::error::{ConfigError, Error, Result, StoreError};

/// Secrets of one Kubernetes namespace.
pub struct KubeSecrets {
    runtime: Runtime,
    api: Api<Secret>,
    namespace: String,
}

impl std::fmt::Debug for KubeSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecrets")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

fn cluster_err(context: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::Cluster(format!("{context}: {err}"))
}

/// Kube-config path, `~/.kube/config` unless given.
fn kube_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let home = dirs::home_dir().ok_or(ConfigError::MissingField {
        field: "home directory (needed for ~/.kube/config)",
    })?;
    debug!("using default kubernetes config file");
    Ok(home.join(".kube").join("config"))
}

async fn load_config(
    kube_config: Option<&Path>,
    context: Option<&str>,
    in_cluster: bool,
) -> Result<Config> {
    if in_cluster {
        info!("using in-cluster kubernetes client");
        return Ok(Config::incluster().map_err(|e| cluster_err("in-cluster config", e))?);
    }

    let path = kube_config_path(kube_config)?;
    info!(kube_config = %path.display(), "using local kube-config");
    if !fs::exists(&path) {
        return Err(ConfigError::KubeConfigNotFound(path).into());
    }

    let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| cluster_err("kube-config", e))?;
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..KubeConfigOptions::default()
    };
    Ok(Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| cluster_err("kube-config", e))?)
}

impl KubeSecrets {
    /// Connect to the cluster, from a local kube-config or in-cluster discovery.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::KubeConfigNotFound` when the kube-config file is
    /// missing and `StoreError::Cluster` when the client can't be built.
    pub fn connect(
        kube_config: Option<&Path>,
        context: Option<&str>,
        namespace: &str,
        in_cluster: bool,
    ) -> Result<Self> {
        // Another component may already have installed a provider.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| cluster_err("failed to create runtime", e))?;

        let client = runtime.block_on(async {
            let config = load_config(kube_config, context, in_cluster).await?;
            let client = Client::try_from(config).map_err(|e| cluster_err("client", e))?;
            Ok::<Client, Error>(client)
        })?;

        info!(namespace = %namespace, "kubernetes client ready");
        Ok(Self {
            runtime,
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
        })
    }
}

impl ClusterStore for KubeSecrets {
    fn exists(&self, name: &str) -> Result<bool> {
        let found = self
            .runtime
            .block_on(self.api.get_opt(name))
            .map_err(|e| cluster_err("get secret", e))?
            .is_some();
        debug!(secret = %name, found, "checked secret");
        Ok(found)
    }

    fn read(&self, name: &str) -> Result<SecretData> {
        let secret = self
            .runtime
            .block_on(self.api.get(name))
            .map_err(|e| cluster_err("get secret", e))?;

        let data: SecretData = secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.0))
            .collect();
        debug!(secret = %name, keys = data.len(), "read secret");
        Ok(data)
    }

    fn write(&self, name: &str, secret_type: &str, data: &SecretData) -> Result<()> {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(self.namespace.clone()),
                ..ObjectMeta::default()
            },
            type_: (!secret_type.is_empty()).then(|| secret_type.to_string()),
            data: Some(
                data.iter()
                    .map(|(key, value)| (key.clone(), ByteString(value.clone())))
                    .collect(),
            ),
            ..Secret::default()
        };

        self.runtime
            .block_on(self.api.create(&PostParams::default(), &secret))
            .map_err(|e| cluster_err("create secret", e))?;
        info!(secret = %name, secret_type = %secret_type, "created secret");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.runtime
            .block_on(self.api.delete(name, &DeleteParams::default()))
            .map_err(|e| cluster_err("delete secret", e))?;
        info!(secret = %name, "deleted secret");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_kube_config_path() {
        let path = kube_config_path(Some(Path::new("/etc/kube.yaml"))).unwrap();
        assert_eq!(path, PathBuf::from("/etc/kube.yaml"));
    }

    #[test]
    fn test_missing_kube_config() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("config");

        let err = KubeSecrets::connect(Some(&missing), None, "default", false).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::KubeConfigNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_kube_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config");
        std::fs::write(&path, "clusters: [unclosed").unwrap();

        let err = KubeSecrets::connect(Some(&path), None, "default", false).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Cluster(_))));
    }

    #[test]
    fn test_unknown_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config");
        std::fs::write(
            &path,
            "apiVersion: v1\nkind: Config\nclusters: []\ncontexts: []\nusers: []\n",
        )
        .unwrap();

        let err = KubeSecrets::connect(Some(&path), Some("missing"), "default", false).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Cluster(_))));
    }
}
