//! Authenticated session.

use zeroize::Zeroizing;

use super::{Connector, SecretStore};
use crate::core::domain::{SecretCoordinate, StoreAddress};
use crate::core::types::ClientToken;
use crate::error::{ProbeError, SessionError, StoreError, ValidationError};

/// An authenticated handle bound to one store address.
///
/// Produced by the identity exchanger, or built from a token the caller
/// already holds. Its only capability is issuing read probes.
pub struct Session {
    store: Box<dyn SecretStore>,
    token: ClientToken,
}

impl Session {
    pub(crate) fn new(store: Box<dyn SecretStore>, token: ClientToken) -> Self {
        Self { store, token }
    }

    /// Wrap a pre-authenticated token.
    ///
    /// No authentication check is made; a bad token surfaces as a denied
    /// probe.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyInput` for an empty token.
    pub fn from_token(
        store: Box<dyn SecretStore>,
        token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(ValidationError::EmptyInput("token"));
        }
        Ok(Self::new(store, token))
    }

    /// Connect to `address` and wrap a pre-authenticated token.
    ///
    /// The token is checked before any client is built.
    ///
    /// # Errors
    ///
    /// `SessionError::Validation` for an empty token, or
    /// `SessionError::Transport` if the client cannot be built.
    pub fn connect(
        connector: &dyn Connector,
        address: &StoreAddress,
        token: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(ValidationError::EmptyInput("token").into());
        }
        let store = connector.connect(address)?;
        Ok(Self::new(store, token))
    }

    pub fn address(&self) -> &StoreAddress {
        self.store.address()
    }

    /// Issue one read probe against `coordinate`.
    ///
    /// # Errors
    ///
    /// `ProbeError::Forbidden`, `ProbeError::NotFound`, or
    /// `ProbeError::Transport` with the store's diagnostic attached.
    pub fn probe(&self, coordinate: &SecretCoordinate) -> Result<(), ProbeError> {
        self.store
            .read_latest(&self.token, coordinate)
            .map_err(|e| match e {
                StoreError::Denied(msg) => ProbeError::Forbidden(msg),
                StoreError::NotFound(msg) => ProbeError::NotFound(msg),
                StoreError::Transport(t) => ProbeError::Transport(t),
            })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("address", self.address())
            .field("token", &"[redacted]")
            .finish()
    }
}
