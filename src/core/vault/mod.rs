//! Secret-store client.
//!
//! The pipeline talks to the store through two small traits so the HTTP
//! implementation can be swapped for a scripted one:
//!
//! - [`Connector`] builds a client for a store address
//! - [`SecretStore`] performs the three calls the pipeline needs
//!
//! [`Session`] pairs a connected store with a client token.

mod http;
#[cfg(test)]
pub(crate) mod mock;
mod session;

use std::time::Duration;

use crate::core::constants;
use crate::core::domain::{IdentityPair, SecretCoordinate, StoreAddress};
use crate::core::types::ClientToken;
use crate::error::{StoreError, TransportError};

pub use http::{HttpConnector, HttpStore};
pub use session::Session;

/// Client settings shared by every connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// AppRole auth mount, without slashes
    pub approle_mount: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Vault Enterprise namespace
    pub namespace: Option<String>,
    /// Accept invalid TLS certificates
    pub tls_skip_verify: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            approle_mount: constants::DEFAULT_APPROLE_MOUNT.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            namespace: None,
            tls_skip_verify: false,
        }
    }
}

/// A connected secret-store client.
///
/// Every method is a single request with no retries.
pub trait SecretStore: Send + Sync {
    /// Address this client is bound to.
    fn address(&self) -> &StoreAddress;

    /// AppRole login.
    ///
    /// # Errors
    ///
    /// `StoreError::Denied` when the store rejects the identity.
    fn login(&self, identity: &IdentityPair) -> Result<ClientToken, StoreError>;

    /// Check that `token` is currently authenticated.
    ///
    /// # Errors
    ///
    /// `StoreError::Denied` when the token is not accepted.
    fn lookup_self(&self, token: &str) -> Result<(), StoreError>;

    /// Read the latest version of a KV v2 entry and discard the payload.
    ///
    /// # Errors
    ///
    /// `StoreError::Denied` or `StoreError::NotFound` for the corresponding
    /// store answers, `StoreError::Transport` for everything else.
    fn read_latest(&self, token: &str, coordinate: &SecretCoordinate) -> Result<(), StoreError>;
}

/// Builds secret-store clients.
pub trait Connector: Send + Sync {
    /// Connect a client to `address`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the client cannot be constructed.
    fn connect(&self, address: &StoreAddress) -> Result<Box<dyn SecretStore>, TransportError>;
}
