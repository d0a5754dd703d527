//! Error types.
//!
//! Caller-side mistakes (bad config, malformed inputs) are [`Error`] values.
//! Failures inside the validation pipeline have their own per-stage enums and
//! are folded into a [`Verdict`](crate::core::domain::Verdict) by the
//! orchestrator instead of bubbling up as errors.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::domain::TransportKind;

/// Top-level error for everything outside the pipeline verdict.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing config field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unsupported property source: {0}")]
    UnsupportedSource(String),
}

/// Input validation errors, raised before the pipeline starts.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("environment identifier cannot be empty")]
    EmptyEnvironment,

    #[error("invalid store address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid secret coordinate '{coordinate}': {reason}")]
    InvalidCoordinate { coordinate: String, reason: String },

    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("missing input: {0}")]
    MissingInput(String),
}

/// A required configuration property that was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProperty {
    /// Logical field name (`address`, `role_id`, `secret_id`).
    pub field: &'static str,
    /// Property key looked up in the configuration store.
    pub key: String,
}

impl fmt::Display for MissingProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field, self.key)
    }
}

fn join_missing(missing: &[MissingProperty]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Credential resolution failures.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("environment '{environment}' is missing {}", join_missing(.missing))]
    MissingCredentials {
        environment: String,
        missing: Vec<MissingProperty>,
    },

    #[error("configuration store unavailable for environment '{environment}': {reason}")]
    ConfigStoreUnavailable { environment: String, reason: String },
}

impl ResolveError {
    /// Logical names of the missing fields, empty for other failures.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match self {
            Self::MissingCredentials { missing, .. } => missing.iter().map(|m| m.field).collect(),
            Self::ConfigStoreUnavailable { .. } => Vec::new(),
        }
    }
}

/// Failure reported by a property source backend.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SourceError(pub String);

/// Network, protocol or server-side fault talking to the secret store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportKind::Network, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(TransportKind::Protocol, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(TransportKind::Unexpected, message)
    }
}

/// Raw outcome of a single secret-store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("permission denied: {0}")]
    Denied(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Identity exchange failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Access probe failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("access forbidden: {0}")]
    Forbidden(String),

    #[error("secret not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures wrapping a caller-held token into a session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, Error>;
