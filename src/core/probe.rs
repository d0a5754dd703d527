//! Access probe.
//!
//! Issues exactly one read of the latest version of a KV v2 entry and turns
//! the store's answer into a verdict. The payload of a successful read is
//! discarded unread.

use crate::core::auth;
use crate::core::diagnostics::Diagnostics;
use crate::core::domain::{IdentityPair, Outcome, SecretCoordinate, Stage, StoreAddress, Verdict};
use crate::core::vault::{Connector, Session};

/// Probe `coordinate` with an authenticated session.
pub fn probe(
    session: &Session,
    coordinate: &SecretCoordinate,
    diagnostics: &dyn Diagnostics,
) -> Verdict {
    diagnostics.info(&format!(
        "validating read access at {} on {}",
        coordinate,
        session.address()
    ));

    match session.probe(coordinate) {
        Ok(()) => {
            diagnostics.info("read access validation succeeded");
            Verdict::new(
                Outcome::Granted,
                Stage::Probe,
                format!("read access granted at {}", coordinate),
            )
        }
        Err(e) => {
            let verdict = Verdict::from(e);
            diagnostics.error(&format!(
                "read access validation failed at {}: {}",
                coordinate, verdict.message
            ));
            verdict
        }
    }
}

/// Authenticate with an identity pair, then probe `coordinate`.
///
/// The session lives only for this call.
pub fn probe_with_identity(
    connector: &dyn Connector,
    address: &StoreAddress,
    identity: &IdentityPair,
    coordinate: &SecretCoordinate,
    diagnostics: &dyn Diagnostics,
) -> Verdict {
    match auth::authenticate(connector, address, identity, diagnostics) {
        Ok(session) => probe(&session, coordinate, diagnostics),
        Err(e) => Verdict::from(e),
    }
}
