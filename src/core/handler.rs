//! Command runner.
//!
//! Wires configuration and collaborators together and runs one manifest
//! through one command.

use tracing::{info, info_span};

use crate::core::cluster::ClusterStore;
use crate::core::config::Config;
use crate::core::dotenv::DotEnv;
use crate::core::manifest::Manifest;
use crate::core::reconcile::{Copier, Downloader, Uploader};
use crate::core::vault::Vault;
use crate::error::{ConfigError, Result};

/// Runs manifests against a vault and, for `copy`, a cluster store.
pub struct Handler<'a, V> {
    config: Config,
    vault: V,
    cluster: Option<Box<dyn ClusterStore + 'a>>,
}

impl<'a, V: Vault> Handler<'a, V> {
    pub fn new(config: Config, vault: V) -> Self {
        Self {
            config,
            vault,
            cluster: None,
        }
    }

    /// Attach the cluster store used by [`Handler::copy`].
    pub fn with_cluster(mut self, cluster: impl ClusterStore + 'a) -> Self {
        self.cluster = Some(Box::new(cluster));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Push the manifest's entries into the vault.
    pub fn upload(&self, manifest: &Manifest) -> Result<()> {
        let span = info_span!("command", command = "upload", dry_run = self.config.dry_run);

        let mut upload = Uploader::new(&self.vault, &self.config.input_dir, &span);
        upload.prepare(manifest)?;
        upload.execute(self.config.dry_run)
    }

    /// Pull the manifest's entries onto disk, and into `.env` when enabled.
    pub fn download(&self, manifest: &Manifest) -> Result<()> {
        let span = info_span!("command", command = "download", dry_run = self.config.dry_run);

        let mut download = Downloader::new(&self.vault, &self.config.output_dir, &span);
        download.prepare(manifest)?;
        download.execute(self.config.dry_run)?;

        if self.config.dot_env {
            let mut env = DotEnv::new(&self.config.output_dir, &span);
            env.load()?;
            env.merge(download.files());
            env.save(self.config.dry_run)?;
            span.in_scope(|| info!(overwritten = env.overwritten().len(), "dot-env updated"));
        }
        Ok(())
    }

    /// Reconcile the manifest's vault entries into cluster secrets.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when no cluster store is attached.
    pub fn copy(&self, manifest: &Manifest) -> Result<()> {
        let cluster = self.cluster.as_deref().ok_or(ConfigError::MissingField {
            field: "cluster store",
        })?;
        let span = info_span!("command", command = "copy", dry_run = self.config.dry_run);

        let mut download = Downloader::new(&self.vault, &self.config.output_dir, &span);
        download.prepare(manifest)?;

        let mut copy = Copier::new(cluster, download.into_files(), &span);
        copy.prepare()?;
        copy.execute(self.config.dry_run)
    }
}
