//! Command-line interface.

pub mod completions;
pub mod copy;
pub mod download;
pub mod output;
pub mod upload;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::core::config::Config;
use crate::core::constants::{DEFAULT_NAMESPACE, DEFAULT_VAULT_ADDR};
use crate::core::manifest::Manifest;
use crate::error::Result;

/// vault-handler - distribute secrets between Vault, files and Kubernetes.
#[derive(Parser)]
#[command(
    name = "vault-handler",
    about = "Manifest-driven secret distribution between Vault, files and Kubernetes",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Vault API address
    #[arg(long, global = true, env = "VAULT_HANDLER_VAULT_ADDR", default_value = DEFAULT_VAULT_ADDR)]
    pub vault_addr: String,

    /// Vault token
    #[arg(long, global = true, env = "VAULT_HANDLER_VAULT_TOKEN", hide_env_values = true)]
    pub vault_token: Option<String>,

    /// Vault AppRole role-id
    #[arg(long, global = true, env = "VAULT_HANDLER_VAULT_ROLE_ID")]
    pub vault_role_id: Option<String>,

    /// Vault AppRole secret-id
    #[arg(long, global = true, env = "VAULT_HANDLER_VAULT_SECRET_ID", hide_env_values = true)]
    pub vault_secret_id: Option<String>,

    /// Read and validate everything, write nothing
    #[arg(long, global = true, env = "VAULT_HANDLER_DRY_RUN")]
    pub dry_run: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Runtime configuration carrying the global flags.
    pub fn config(&self) -> Config {
        Config {
            dry_run: self.dry_run,
            vault_addr: self.vault_addr.clone(),
            vault_token: self.vault_token.clone(),
            vault_role_id: self.vault_role_id.clone(),
            vault_secret_id: self.vault_secret_id.clone(),
            ..Config::default()
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Upload files (or environment variables) into Vault
    Upload {
        /// Directory holding `<group>.<name>.<extension>` files
        #[arg(long, env = "VAULT_HANDLER_INPUT_DIR", default_value = ".")]
        input_dir: PathBuf,

        /// Manifest files
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },

    /// Download secrets from Vault into files
    Download {
        /// Directory to write `<group>.<name>.<extension>` files to
        #[arg(long, env = "VAULT_HANDLER_OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Also write `<output-dir>/.env`
        #[arg(long, env = "VAULT_HANDLER_DOT_ENV")]
        dot_env: bool,

        /// Manifest files
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },

    /// Copy secrets from Vault into Kubernetes secrets
    Copy {
        /// Kube-config file, defaults to ~/.kube/config
        #[arg(long, env = "VAULT_HANDLER_KUBE_CONFIG")]
        kube_config: Option<PathBuf>,

        /// Kube-config context
        #[arg(long, env = "VAULT_HANDLER_CONTEXT")]
        context: Option<String>,

        /// Target namespace
        #[arg(long, env = "VAULT_HANDLER_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
        namespace: String,

        /// Use the in-cluster service account
        #[arg(long, env = "VAULT_HANDLER_IN_CLUSTER")]
        in_cluster: bool,

        /// Manifest files
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let global = cli.global;

    match cli.command {
        Command::Upload {
            input_dir,
            manifests,
        } => upload::execute(
            Config {
                input_dir,
                ..global.config()
            },
            &manifests,
        ),
        Command::Download {
            output_dir,
            dot_env,
            manifests,
        } => download::execute(
            Config {
                output_dir,
                dot_env,
                ..global.config()
            },
            &manifests,
        ),
        Command::Copy {
            kube_config,
            context,
            namespace,
            in_cluster,
            manifests,
        } => {
            let config = Config {
                kube_config,
                context,
                namespace,
                in_cluster,
                ..global.config()
            };
            copy::execute(config, &manifests)
        }
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Load and run each manifest in order, stopping at the first failure.
pub(crate) fn for_each_manifest<F>(manifests: &[PathBuf], mut run: F) -> Result<()>
where
    F: FnMut(&Manifest) -> Result<()>,
{
    for path in manifests {
        info!(manifest = %path.display(), "handling manifest");
        let manifest = Manifest::from_file(path)?;
        run(&manifest)?;
    }
    Ok(())
}
