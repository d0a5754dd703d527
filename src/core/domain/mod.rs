//! Domain types.

mod address;
mod coordinate;
mod environment;
mod identity;
mod verdict;

pub use address::StoreAddress;
pub use coordinate::SecretCoordinate;
pub use environment::Environment;
pub use identity::IdentityPair;
pub use verdict::{
    AuthFailure, Denial, Outcome, ResolutionFailure, Stage, TransportKind, Verdict,
};
