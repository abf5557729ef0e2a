//! vault-handler - manifest-driven secret distribution.

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vault_handler::cli::output;
use vault_handler::cli::{execute, Cli};
use vault_handler::core::constants::LOG_ENV;
use vault_handler::error::{ConfigError, Error, ValidationError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.global.verbose {
            EnvFilter::new("vault_handler=debug")
        } else {
            EnvFilter::new("vault_handler=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(err: &Error) -> Option<&'static str> {
    match err {
        Error::Config(ConfigError::MissingField { field })
            if field.starts_with("vault-") && *field != "vault-addr" =>
        {
            Some("set --vault-token, or --vault-role-id and --vault-secret-id")
        }
        Error::Validation(ValidationError::DuplicateKey { .. }) => {
            Some("give one of the entries a distinct `key`")
        }
        Error::MissingEnvVar { .. } => Some("export the variable, or drop `fromEnv` to read a file"),
        _ => None,
    }
}
