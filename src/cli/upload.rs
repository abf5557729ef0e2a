//! Upload command.

use std::path::PathBuf;

use crate::cli::{for_each_manifest, output};
use crate::core::config::Config;
use crate::core::handler::Handler;
use crate::core::vault::HttpVault;
use crate::error::Result;

/// Upload every manifest's entries into Vault.
pub fn execute(config: Config, manifests: &[PathBuf]) -> Result<()> {
    config.validate_input()?;
    let auth = config.vault_auth()?;
    let vault = HttpVault::connect(&config.vault_addr, auth)?;

    let dry_run = config.dry_run;
    let handler = Handler::new(config, vault);
    for_each_manifest(manifests, |manifest| handler.upload(manifest))?;

    if dry_run {
        output::success("upload checked (dry-run)");
    } else {
        output::success("uploaded to vault");
    }
    Ok(())
}
