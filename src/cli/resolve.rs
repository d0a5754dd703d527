//! Resolve command.
//!
//! Runs only the resolution stage so operators can see whether an
//! environment's configuration is complete. Values are never printed; the
//! report says which fields are present.

use std::path::Path;

use serde::Serialize;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::diagnostics::TracingDiagnostics;
use crate::core::domain::{Environment, Verdict};
use crate::core::resolve;
use crate::error::Result;

#[derive(Serialize)]
struct Report<'a> {
    environment: &'a str,
    resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    missing: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Execute the resolve command.
pub fn execute(environment: &str, json: bool, config_path: Option<&Path>) -> Result<u8> {
    let environment = Environment::new(environment)?;
    let config = Config::load(config_path)?;
    let source = resolve::source_for(&config)?;

    let result = resolve::resolve(
        source.as_ref(),
        &config.properties,
        &environment,
        &TracingDiagnostics,
    );

    match result {
        Ok(creds) => {
            if json {
                let report = Report {
                    environment: environment.as_str(),
                    resolved: true,
                    address: Some(creds.address.as_str()),
                    missing: Vec::new(),
                    reason: None,
                    message: None,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::section(&format!("Credentials for {}", environment));
                output::kv("address:  ", creds.address.as_str());
                output::kv("role_id:  ", "present");
                output::kv("secret_id:", "present");
                println!();
                output::success("all credentials resolved");
            }
            Ok(0)
        }
        Err(e) => {
            let missing = e.missing_fields();
            let verdict = Verdict::from(e);
            if json {
                let report = Report {
                    environment: environment.as_str(),
                    resolved: false,
                    address: None,
                    missing,
                    reason: verdict.outcome.reason(),
                    message: Some(verdict.message.clone()),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::section(&format!("Credentials for {}", environment));
                for field in &missing {
                    output::kv(&format!("{}:", field), "missing");
                }
                output::error(&verdict.message);
                output::hint("Check the property rows stored for this environment");
            }
            Ok(verdict.outcome.exit_code())
        }
    }
}
