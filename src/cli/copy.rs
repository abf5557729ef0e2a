//! Copy command.

use std::path::PathBuf;

use crate::cli::{for_each_manifest, output};
use crate::core::config::Config;
use crate::core::handler::Handler;
use crate::core::vault::HttpVault;
use crate::error::Result;

/// Copy every manifest's entries from Vault into Kubernetes secrets.
pub fn execute(config: Config, manifests: &[PathBuf]) -> Result<()> {
    config.validate_kubernetes()?;
    let auth = config.vault_auth()?;

    let cluster = connect(&config)?;
    let vault = HttpVault::connect(&config.vault_addr, auth)?;

    let namespace = config.namespace.clone();
    let dry_run = config.dry_run;
    let handler = Handler::new(config, vault).with_cluster(cluster);
    for_each_manifest(manifests, |manifest| handler.copy(manifest))?;

    if dry_run {
        output::success("copy checked (dry-run)");
    } else {
        output::success(&format!("copied to namespace {}", output::path(&namespace)));
    }
    Ok(())
}

#[cfg(feature = "kubernetes")]
fn connect(config: &Config) -> Result<crate::core::cluster::KubeSecrets> {
    crate::core::cluster::KubeSecrets::connect(
        config.kube_config.as_deref(),
        config.context.as_deref(),
        &config.namespace,
        config.in_cluster,
    )
}

#[cfg(not(feature = "kubernetes"))]
fn connect(_config: &Config) -> Result<crate::core::cluster::MemoryCluster> {
    Err(crate::error::ConfigError::Unsupported("kubernetes support").into())
}
