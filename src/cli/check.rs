//! Check command.
//!
//! Runs one validation and reports the verdict. The exit code encodes the
//! outcome so scripts and CI jobs can branch on it.

use std::path::Path;

use clap::Args;
use serde::Serialize;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::core::domain::{
    Denial, Environment, IdentityPair, Outcome, SecretCoordinate, Stage, StoreAddress, Verdict,
};
use crate::core::pipeline::{Request, Validator};
use crate::core::resolve::{self, PropertySource};
use crate::core::vault::{Connector, HttpConnector, Session};
use crate::error::{AuthError, ConfigError, Error, Result, SessionError, ValidationError};

/// Arguments for `vaultprobe check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Environment to resolve credentials for (e.g., QA13)
    #[arg(short, long = "env")]
    pub environment: Option<String>,

    /// Store address, used with --role-id/--secret-id or --token
    #[arg(long, env = "VAULT_ADDR")]
    pub addr: Option<String>,

    /// AppRole role ID
    #[arg(long, env = "VAULT_ROLE_ID", hide_env_values = true)]
    pub role_id: Option<String>,

    /// AppRole secret ID
    #[arg(long, env = "VAULT_SECRET_ID", hide_env_values = true)]
    pub secret_id: Option<String>,

    /// Pre-authenticated client token
    #[arg(long, env = "VAULT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// KV v2 mount (e.g., nodalsuite/qa13/kv)
    #[arg(short, long, default_value = "")]
    pub mount: String,

    /// Path within the mount, or `<mount>/data/<path>` when --mount is omitted
    #[arg(short, long)]
    pub path: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which request the flags describe.
enum Input {
    Environment(Environment),
    Identity {
        address: StoreAddress,
        identity: IdentityPair,
    },
    Token {
        address: StoreAddress,
        token: String,
    },
}

impl Input {
    fn kind(&self) -> &'static str {
        match self {
            Self::Environment(_) => "environment",
            Self::Identity { .. } => "identity",
            Self::Token { .. } => "token",
        }
    }
}

/// Machine-readable check report.
#[derive(Serialize)]
struct Report<'a> {
    verdict: &'static str,
    reason: Option<&'static str>,
    stage: Stage,
    message: &'a str,
    coordinate: String,
    input: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
    checked_at: String,
}

/// Execute the check command.
///
/// Returns the verdict's exit code. Caller mistakes (bad coordinate, missing
/// inputs, broken config) are returned as errors instead.
pub fn execute(args: CheckArgs, config_path: Option<&Path>) -> Result<u8> {
    let coordinate = SecretCoordinate::new(&args.mount, &args.path)?;
    let input = select_input(&args)?;
    let config = Config::load(config_path)?;

    let connector = HttpConnector::new(config.vault.store_options());
    let diagnostics = TracingDiagnostics;

    let verdict = match &input {
        Input::Environment(environment) => {
            let source = configured_source(&config)?;
            let mut validator = Validator::new(&connector, &diagnostics);
            if let Some(source) = source.as_deref() {
                validator = validator.with_source(source, config.properties.clone());
            }
            validator.validate(&Request::Environment(environment.clone()), &coordinate)
        }
        Input::Identity { address, identity } => {
            let request = Request::Identity {
                address: address.clone(),
                identity: identity.clone(),
            };
            Validator::new(&connector, &diagnostics).validate(&request, &coordinate)
        }
        Input::Token { address, token } => {
            check_token(&connector, &diagnostics, address, token, &coordinate)?
        }
    };

    let environment = match &input {
        Input::Environment(env) => Some(env.as_str()),
        _ => None,
    };

    if args.json {
        let report = Report {
            verdict: verdict.outcome.label(),
            reason: verdict.outcome.reason(),
            stage: verdict.stage,
            message: &verdict.message,
            coordinate: coordinate.to_string(),
            input: input.kind(),
            environment,
            checked_at: chrono::Utc::now().to_rfc3339(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_verdict(&verdict, &coordinate, environment);
    }

    Ok(verdict.outcome.exit_code())
}

/// Validate with a caller-held token.
///
/// A client that cannot be built is reported at the authenticate stage,
/// since no probe was issued.
fn check_token(
    connector: &dyn Connector,
    diagnostics: &dyn Diagnostics,
    address: &StoreAddress,
    token: &str,
    coordinate: &SecretCoordinate,
) -> Result<Verdict> {
    match Session::connect(connector, address, token) {
        Ok(session) => Ok(Validator::new(connector, diagnostics)
            .validate(&Request::Session(&session), coordinate)),
        Err(SessionError::Transport(e)) => Ok(Verdict::from(AuthError::Transport(e))),
        Err(SessionError::Validation(e)) => Err(e.into()),
    }
}

/// Pick the request from the flags.
///
/// `--env` wins over everything else. Otherwise a complete role/secret pair
/// is preferred over a token, so `VAULT_TOKEN` in the environment does not
/// shadow explicit AppRole flags.
fn select_input(args: &CheckArgs) -> Result<Input> {
    if let Some(env) = &args.environment {
        return Ok(Input::Environment(Environment::new(env)?));
    }

    let address = args
        .addr
        .as_deref()
        .ok_or_else(|| ValidationError::MissingInput("--addr or VAULT_ADDR".to_string()))?;
    let address = StoreAddress::parse(address)?;

    match (&args.role_id, &args.secret_id, &args.token) {
        (Some(role_id), Some(secret_id), _) => Ok(Input::Identity {
            address,
            identity: IdentityPair::new(role_id.as_str(), secret_id.as_str())?,
        }),
        (_, _, Some(token)) => {
            if token.trim().is_empty() {
                return Err(ValidationError::EmptyInput("token").into());
            }
            Ok(Input::Token {
                address,
                token: token.clone(),
            })
        }
        (Some(_), None, None) => {
            Err(ValidationError::MissingInput("--secret-id or VAULT_SECRET_ID".to_string()).into())
        }
        (None, Some(_), None) => {
            Err(ValidationError::MissingInput("--role-id or VAULT_ROLE_ID".to_string()).into())
        }
        (None, None, None) => Err(ValidationError::MissingInput(
            "--env, --role-id/--secret-id, or --token".to_string(),
        )
        .into()),
    }
}

/// The configured property store, or `None` when no location is configured.
///
/// A missing location becomes a `resolution_failed` verdict in the pipeline;
/// any other config problem is a caller error.
fn configured_source(config: &Config) -> Result<Option<Box<dyn PropertySource>>> {
    match resolve::source_for(config) {
        Ok(source) => Ok(Some(source)),
        Err(Error::Config(ConfigError::MissingField { .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

fn print_verdict(verdict: &Verdict, coordinate: &SecretCoordinate, environment: Option<&str>) {
    output::section("Vault access check");
    if let Some(env) = environment {
        output::kv("environment:", env);
    }
    output::kv("coordinate: ", coordinate);
    output::kv("stage:      ", verdict.stage);
    output::outcome("verdict:    ", &verdict.outcome);
    println!();

    if verdict.is_granted() {
        output::success(&format!("read access granted to {}", coordinate));
        return;
    }

    output::error(&verdict.message);
    output::hint(hint_for(&verdict.outcome));
}

fn hint_for(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Granted => "",
        Outcome::Denied(Denial::Forbidden) => {
            "Check the policies attached to the AppRole for this path"
        }
        Outcome::Denied(Denial::NotFound) => "Check the mount and path; no entry exists there",
        Outcome::AuthenticationFailed(_) => {
            "Check the role ID and secret ID; secret IDs may expire or be use-limited"
        }
        Outcome::ResolutionFailed(_) => {
            "Check the configuration store for this environment (see `vaultprobe resolve`)"
        }
        Outcome::TransportError(_) => "Check the store address and that it is reachable",
    }
}
