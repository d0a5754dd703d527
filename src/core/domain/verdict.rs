//! Access verdict.
//!
//! The only observable output of a validation run. It carries the outcome,
//! the stage that produced it, and a non-secret diagnostic message.

use serde::Serialize;

use crate::error::{AuthError, ProbeError, ResolveError};

/// Pipeline stage that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Resolve,
    Authenticate,
    Probe,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Authenticate => "authenticate",
            Self::Probe => "probe",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a probe was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    Forbidden,
    NotFound,
}

/// Why authentication failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailure {
    InvalidIdentity,
}

/// Why credential resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionFailure {
    MissingCredentials,
    ConfigStoreUnavailable,
}

/// Class of transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// DNS, connection refused, TLS, timeouts.
    Network,
    /// Responses that could not be understood.
    Protocol,
    /// Store-side faults and any other status.
    Unexpected,
}

impl TransportKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Protocol => "protocol",
            Self::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified end-to-end outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Granted,
    Denied(Denial),
    AuthenticationFailed(AuthFailure),
    ResolutionFailed(ResolutionFailure),
    TransportError(TransportKind),
}

impl Outcome {
    /// Top-level label (`granted`, `denied`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied(_) => "denied",
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::ResolutionFailed(_) => "resolution_failed",
            Self::TransportError(_) => "transport_error",
        }
    }

    /// Subtype label, `None` for `Granted`.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Granted => None,
            Self::Denied(Denial::Forbidden) => Some("forbidden"),
            Self::Denied(Denial::NotFound) => Some("not_found"),
            Self::AuthenticationFailed(AuthFailure::InvalidIdentity) => Some("invalid_identity"),
            Self::ResolutionFailed(ResolutionFailure::MissingCredentials) => {
                Some("missing_credentials")
            }
            Self::ResolutionFailed(ResolutionFailure::ConfigStoreUnavailable) => {
                Some("config_store_unavailable")
            }
            Self::TransportError(kind) => Some(kind.name()),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Granted => 0,
            Self::Denied(_) => 2,
            Self::AuthenticationFailed(_) => 3,
            Self::ResolutionFailed(_) => 4,
            Self::TransportError(_) => 5,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({})", self.label(), reason),
            None => f.write_str(self.label()),
        }
    }
}

/// Result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub stage: Stage,
    pub message: String,
}

impl Verdict {
    pub fn new(outcome: Outcome, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            outcome,
            stage,
            message: message.into(),
        }
    }

    pub fn is_granted(&self) -> bool {
        self.outcome == Outcome::Granted
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.outcome, self.stage, self.message)
    }
}

impl From<ResolveError> for Verdict {
    fn from(err: ResolveError) -> Self {
        let failure = match err {
            ResolveError::MissingCredentials { .. } => ResolutionFailure::MissingCredentials,
            ResolveError::ConfigStoreUnavailable { .. } => {
                ResolutionFailure::ConfigStoreUnavailable
            }
        };
        Self::new(
            Outcome::ResolutionFailed(failure),
            Stage::Resolve,
            err.to_string(),
        )
    }
}

impl From<AuthError> for Verdict {
    fn from(err: AuthError) -> Self {
        let outcome = match &err {
            AuthError::InvalidIdentity(_) => {
                Outcome::AuthenticationFailed(AuthFailure::InvalidIdentity)
            }
            AuthError::Transport(t) => Outcome::TransportError(t.kind),
        };
        Self::new(outcome, Stage::Authenticate, err.to_string())
    }
}

impl From<ProbeError> for Verdict {
    fn from(err: ProbeError) -> Self {
        let outcome = match &err {
            ProbeError::Forbidden(_) => Outcome::Denied(Denial::Forbidden),
            ProbeError::NotFound(_) => Outcome::Denied(Denial::NotFound),
            ProbeError::Transport(t) => Outcome::TransportError(t.kind),
        };
        Self::new(outcome, Stage::Probe, err.to_string())
    }
}
