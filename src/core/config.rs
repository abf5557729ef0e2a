//! Runtime configuration.
//!
//! Built from command-line flags (and their `VAULT_HANDLER_*` environment
//! bindings), then validated per command before any collaborator is created.

use std::path::PathBuf;

use tracing::debug;

use crate::core::constants::{DEFAULT_NAMESPACE, DEFAULT_VAULT_ADDR};
use crate::core::fs;
use crate::core::vault::VaultAuth;
use crate::error::{ConfigError, Result};

/// Options shared by every command.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub dry_run: bool,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Also project downloaded secrets into `<output_dir>/.env`.
    pub dot_env: bool,
    pub vault_addr: String,
    pub vault_token: Option<String>,
    pub vault_role_id: Option<String>,
    pub vault_secret_id: Option<String>,
    pub kube_config: Option<PathBuf>,
    pub context: Option<String>,
    pub namespace: String,
    pub in_cluster: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            dot_env: false,
            vault_addr: DEFAULT_VAULT_ADDR.to_string(),
            vault_token: None,
            vault_role_id: None,
            vault_secret_id: None,
            kube_config: None,
            context: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            in_cluster: false,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("dry_run", &self.dry_run)
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("dot_env", &self.dot_env)
            .field("vault_addr", &self.vault_addr)
            .field("vault_token", &redacted(&self.vault_token))
            .field("vault_role_id", &self.vault_role_id)
            .field("vault_secret_id", &redacted(&self.vault_secret_id))
            .field("kube_config", &self.kube_config)
            .field("context", &self.context)
            .field("namespace", &self.namespace)
            .field("in_cluster", &self.in_cluster)
            .finish()
    }
}

fn informed(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Config {
    /// Check the Vault address and credentials.
    ///
    /// Either a token, or an AppRole role-id plus secret-id, never both.
    pub fn validate_vault(&self) -> Result<()> {
        self.vault_auth().map(|_| ())
    }

    /// Check the upload input directory exists.
    pub fn validate_input(&self) -> Result<()> {
        require_dir(&self.input_dir)
    }

    /// Check the download output directory exists.
    pub fn validate_output(&self) -> Result<()> {
        require_dir(&self.output_dir)
    }

    /// Check the Kubernetes options.
    pub fn validate_kubernetes(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "namespace" }.into());
        }

        if self.in_cluster {
            if self.kube_config.is_some() || informed(&self.context).is_some() {
                return Err(ConfigError::InvalidValue {
                    field: "in-cluster",
                    reason: "can't be combined with kube-config or context".into(),
                }
                .into());
            }
            return Ok(());
        }

        match &self.kube_config {
            Some(path) if !fs::exists(path) => {
                Err(ConfigError::KubeConfigNotFound(path.clone()).into())
            }
            _ => Ok(()),
        }
    }

    /// Typed Vault credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the address is missing or the credentials are
    /// incomplete or ambiguous.
    pub fn vault_auth(&self) -> Result<VaultAuth> {
        if self.vault_addr.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "vault-addr",
            }
            .into());
        }

        let token = informed(&self.vault_token);
        let role_id = informed(&self.vault_role_id);
        let secret_id = informed(&self.vault_secret_id);

        match (token, role_id, secret_id) {
            (Some(token), None, None) => {
                debug!("vault token authentication configured");
                Ok(VaultAuth::Token(token.to_string()))
            }
            (Some(_), _, _) => Err(ConfigError::InvalidValue {
                field: "vault-token",
                reason: "can't be combined with vault-role-id or vault-secret-id".into(),
            }
            .into()),
            (None, Some(role_id), Some(secret_id)) => {
                debug!("vault AppRole authentication configured");
                Ok(VaultAuth::AppRole {
                    role_id: role_id.to_string(),
                    secret_id: secret_id.to_string(),
                })
            }
            (None, Some(_), None) => Err(ConfigError::MissingField {
                field: "vault-secret-id",
            }
            .into()),
            (None, None, Some(_)) => Err(ConfigError::MissingField {
                field: "vault-role-id",
            }
            .into()),
            (None, None, None) => Err(ConfigError::MissingField {
                field: "vault-token (or vault-role-id and vault-secret-id)",
            }
            .into()),
        }
    }
}

fn require_dir(path: &std::path::Path) -> Result<()> {
    if fs::is_dir(path) {
        Ok(())
    } else {
        Err(ConfigError::DirNotFound(path.to_path_buf()).into())
    }
}
