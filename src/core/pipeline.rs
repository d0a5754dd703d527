//! Validation orchestrator.
//!
//! Drives `Start -> Resolving -> Authenticating -> Probing -> verdict`.
//! Resolving is skipped when the caller supplies an address and identity
//! pair, and authenticating is skipped when the caller supplies a session.
//! The first failing stage ends the run; nothing is retried.

use tracing::debug;

use crate::core::config::PropertyNames;
use crate::core::diagnostics::Diagnostics;
use crate::core::domain::{
    Environment, IdentityPair, Outcome, ResolutionFailure, SecretCoordinate, Stage, StoreAddress,
    Verdict,
};
use crate::core::probe;
use crate::core::resolve::{self, PropertySource};
use crate::core::vault::{Connector, Session};

/// What the caller brings to a validation.
#[derive(Debug)]
pub enum Request<'a> {
    /// Resolve address and identity from the configuration store.
    Environment(Environment),
    /// Address and identity pair supplied directly.
    Identity {
        address: StoreAddress,
        identity: IdentityPair,
    },
    /// An already-authenticated session, borrowed for one probe.
    Session(&'a Session),
}

impl Request<'_> {
    /// First pipeline stage this request enters.
    pub fn entry_stage(&self) -> Stage {
        match self {
            Self::Environment(_) => Stage::Resolve,
            Self::Identity { .. } => Stage::Authenticate,
            Self::Session(_) => Stage::Probe,
        }
    }
}

/// Runs validations.
///
/// Holds only shared, immutable collaborators; every call is independent.
pub struct Validator<'a> {
    connector: &'a dyn Connector,
    diagnostics: &'a dyn Diagnostics,
    source: Option<&'a dyn PropertySource>,
    properties: PropertyNames,
}

impl<'a> Validator<'a> {
    pub fn new(connector: &'a dyn Connector, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            connector,
            diagnostics,
            source: None,
            properties: PropertyNames::default(),
        }
    }

    /// Configuration store used for `Request::Environment`.
    pub fn with_source(mut self, source: &'a dyn PropertySource, properties: PropertyNames) -> Self {
        self.source = Some(source);
        self.properties = properties;
        self
    }

    /// Validate read access to `coordinate`.
    pub fn validate(&self, request: &Request<'_>, coordinate: &SecretCoordinate) -> Verdict {
        debug!(entry = %request.entry_stage(), coordinate = %coordinate, "validation started");

        let verdict = match request {
            Request::Session(session) => {
                self.diagnostics
                    .info("using supplied session, skipping resolution and authentication");
                probe::probe(session, coordinate, self.diagnostics)
            }
            Request::Identity { address, identity } => {
                self.diagnostics
                    .info("using supplied credentials, skipping resolution");
                probe::probe_with_identity(
                    self.connector,
                    address,
                    identity,
                    coordinate,
                    self.diagnostics,
                )
            }
            Request::Environment(environment) => match self.resolve(environment) {
                Ok(creds) => probe::probe_with_identity(
                    self.connector,
                    &creds.address,
                    &creds.identity,
                    coordinate,
                    self.diagnostics,
                ),
                Err(verdict) => verdict,
            },
        };

        debug!(
            outcome = %verdict.outcome,
            stage = %verdict.stage,
            "validation finished"
        );
        verdict
    }

    fn resolve(&self, environment: &Environment) -> Result<resolve::ResolvedCredentials, Verdict> {
        let Some(source) = self.source else {
            let verdict = Verdict::new(
                Outcome::ResolutionFailed(ResolutionFailure::ConfigStoreUnavailable),
                Stage::Resolve,
                format!(
                    "no configuration store configured to resolve environment '{}'",
                    environment
                ),
            );
            self.diagnostics.error(&verdict.message);
            return Err(verdict);
        };

        resolve::resolve(source, &self.properties, environment, self.diagnostics).map_err(|e| {
            self.diagnostics
                .error(&format!("credential resolution failed: {}", e));
            Verdict::from(e)
        })
    }
}
