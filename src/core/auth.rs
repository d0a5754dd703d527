//! Identity exchange.
//!
//! Turns a store address and AppRole identity pair into an authenticated
//! [`Session`]: one login, then an explicit token self-lookup, since a login
//! that succeeds at the transport level does not by itself prove the token
//! is usable.

use tracing::debug;

use crate::core::diagnostics::Diagnostics;
use crate::core::domain::{IdentityPair, StoreAddress};
use crate::core::vault::{Connector, Session};
use crate::error::{AuthError, StoreError};

/// Authenticate against `address` with an AppRole identity pair.
///
/// Makes a single attempt; retrying is left to the caller.
///
/// # Errors
///
/// Returns `AuthError::InvalidIdentity` when the login is rejected or the
/// new token fails the self-lookup, and `AuthError::Transport` for network,
/// protocol or store-side faults.
pub fn authenticate(
    connector: &dyn Connector,
    address: &StoreAddress,
    identity: &IdentityPair,
    diagnostics: &dyn Diagnostics,
) -> Result<Session, AuthError> {
    diagnostics.info(&format!("authenticating with AppRole at {}", address));

    let result = exchange(connector, address, identity);
    match &result {
        Ok(_) => diagnostics.info("authentication succeeded"),
        Err(e) => diagnostics.error(&format!("authentication failed: {}", e)),
    }
    result
}

fn exchange(
    connector: &dyn Connector,
    address: &StoreAddress,
    identity: &IdentityPair,
) -> Result<Session, AuthError> {
    let store = connector.connect(address)?;

    let token = store.login(identity).map_err(|e| match e {
        StoreError::Denied(msg) => AuthError::InvalidIdentity(format!("login rejected: {}", msg)),
        StoreError::NotFound(msg) => AuthError::InvalidIdentity(msg),
        StoreError::Transport(t) => AuthError::Transport(t),
    })?;
    debug!("login accepted, verifying token");

    store.lookup_self(&token).map_err(|e| match e {
        StoreError::Denied(msg) | StoreError::NotFound(msg) => AuthError::InvalidIdentity(
            format!("token not authenticated after login: {}", msg),
        ),
        StoreError::Transport(t) => AuthError::Transport(t),
    })?;

    Ok(Session::new(store, token))
}
