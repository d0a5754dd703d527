//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use zeroize::Zeroizing;

/// A property name in the configuration store (e.g. `vault.addr`).
pub type PropertyName = String;

/// A property value as returned by the configuration store.
pub type PropertyValue = String;

/// A secret-store client token.
///
/// Identity material: wiped from memory on drop and never logged.
pub type ClientToken = Zeroizing<String>;
