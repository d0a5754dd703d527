//! vaultprobe - confirm credentials can read a Vault secret, without reading it.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultprobe::cli::output;
use vaultprobe::cli::{execute, Cli};
use vaultprobe::core::constants::LOG_ENV;
use vaultprobe::error::{ConfigError, Error, ValidationError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable with --json
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vaultprobe=debug")
        } else {
            EnvFilter::new("vaultprobe=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .init();
    }

    match execute(cli.command, cli.config.as_deref()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let suggestion = match &e {
                Error::Config(ConfigError::NotFound(_)) => {
                    Some("check --config or VAULTPROBE_CONFIG")
                }
                Error::Config(ConfigError::MissingField { .. }) => {
                    Some("set [source] path in .vaultprobe.toml")
                }
                Error::Validation(ValidationError::MissingInput(_)) => {
                    Some("pass --env, or --addr with --role-id/--secret-id or --token")
                }
                Error::Validation(ValidationError::InvalidCoordinate { .. }) => {
                    Some("use --mount <mount> --path <path>, or --path <mount>/data/<path>")
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(hint);
            }
            ExitCode::from(1)
        }
    }
}
