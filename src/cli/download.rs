//! Download command.

use std::path::PathBuf;

use crate::cli::{for_each_manifest, output};
use crate::core::config::Config;
use crate::core::handler::Handler;
use crate::core::vault::HttpVault;
use crate::error::Result;

/// Download every manifest's entries from Vault.
pub fn execute(config: Config, manifests: &[PathBuf]) -> Result<()> {
    config.validate_output()?;
    let auth = config.vault_auth()?;
    let vault = HttpVault::connect(&config.vault_addr, auth)?;

    let output_dir = config.output_dir.display().to_string();
    let dry_run = config.dry_run;
    let handler = Handler::new(config, vault);
    for_each_manifest(manifests, |manifest| handler.download(manifest))?;

    if dry_run {
        output::success("download checked (dry-run)");
    } else {
        output::success(&format!("downloaded to {}", output::path(&output_dir)));
    }
    Ok(())
}
