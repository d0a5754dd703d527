//! Credential resolution.
//!
//! Looks up the secret-store address and AppRole identity pair for an
//! environment in a configuration property store.
//!
//! ## Adding a New Property Source
//!
//! 1. Implement the `PropertySource` trait
//! 2. Add the implementation in a new file (e.g., `postgres.rs`)
//! 3. Wire it into `backend::source_for`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::PropertyNames;
use crate::core::constants;
use crate::core::diagnostics::Diagnostics;
use crate::core::domain::{Environment, IdentityPair, StoreAddress};
use crate::core::types::{PropertyName, PropertyValue};
use crate::error::{MissingProperty, ResolveError, SourceError};

mod backend;
mod file;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use backend::source_for;
pub use file::FileSource;
pub use memory::MemorySource;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSource;

/// One (name, value) row returned by a property source.
#[derive(Clone, PartialEq, Eq)]
pub struct Property {
    pub name: PropertyName,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Debug for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value", &"[redacted]")
            .finish()
    }
}

/// Configuration property store.
///
/// Each `fetch` is one read-only query scoped to a single environment. A
/// connection, if any, is opened and released within the call.
pub trait PropertySource: Send + Sync {
    /// Fetch every property row stored for `environment`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on connectivity failures or malformed rows.
    fn fetch(&self, environment: &Environment) -> Result<Vec<Property>, SourceError>;
}

/// Location of a file-backed property store.
///
/// The template may contain `{environment}`; relative paths resolve
/// against `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    template: String,
    base_dir: PathBuf,
}

impl SourceLocation {
    pub fn new(template: impl Into<String>, base_dir: impl AsRef<Path>) -> Self {
        Self {
            template: template.into(),
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Concrete path for an environment.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the template substitutes the environment
    /// and the identifier contains a path separator or `..`.
    pub fn path_for(&self, environment: &str) -> Result<PathBuf, SourceError> {
        let substituted = self.template.contains(constants::ENVIRONMENT_PLACEHOLDER);
        if substituted
            && (environment.contains(['/', '\\']) || environment.contains(".."))
        {
            return Err(SourceError(format!(
                "environment '{}' cannot be used in a store path",
                environment
            )));
        }

        let path = PathBuf::from(
            self.template
                .replace(constants::ENVIRONMENT_PLACEHOLDER, environment),
        );
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.base_dir.join(path))
        }
    }
}

/// Fully-populated credentials for one environment.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub address: StoreAddress,
    pub identity: IdentityPair,
}

/// Resolve the store address and identity pair for `environment`.
///
/// Performs exactly one `fetch`. Properties other than the three configured
/// names are ignored; when a name repeats, the last non-empty value wins.
///
/// # Errors
///
/// Returns `ResolveError::MissingCredentials` naming every absent or empty
/// property, or `ResolveError::ConfigStoreUnavailable` when the store fails
/// or returns a malformed address.
pub fn resolve(
    source: &dyn PropertySource,
    names: &PropertyNames,
    environment: &Environment,
    diagnostics: &dyn Diagnostics,
) -> Result<ResolvedCredentials, ResolveError> {
    diagnostics.info(&format!(
        "resolving credentials for environment {}",
        environment
    ));

    let unavailable = |reason: String| ResolveError::ConfigStoreUnavailable {
        environment: environment.to_string(),
        reason,
    };

    let rows = source
        .fetch(environment)
        .map_err(|e| unavailable(e.to_string()))?;
    debug!(environment = %environment, rows = rows.len(), "fetched properties");

    let address = last_value(&rows, &names.address);
    let role_id = last_value(&rows, &names.role_id);
    let secret_id = last_value(&rows, &names.secret_id);

    let missing: Vec<MissingProperty> = [
        ("address", &names.address, address.is_none()),
        ("role_id", &names.role_id, role_id.is_none()),
        ("secret_id", &names.secret_id, secret_id.is_none()),
    ]
    .into_iter()
    .filter(|(_, _, absent)| *absent)
    .map(|(field, key, _)| MissingProperty {
        field,
        key: key.clone(),
    })
    .collect();

    let (Some(address), Some(role_id), Some(secret_id)) = (address, role_id, secret_id) else {
        return Err(ResolveError::MissingCredentials {
            environment: environment.to_string(),
            missing,
        });
    };

    let address = StoreAddress::parse(address)
        .map_err(|e| unavailable(format!("malformed property {}: {}", names.address, e)))?;
    let identity = IdentityPair::new(role_id, secret_id).map_err(|e| unavailable(e.to_string()))?;

    debug!(environment = %environment, address = %address, "credentials resolved");
    Ok(ResolvedCredentials { address, identity })
}

/// Last non-empty (trimmed) value stored under `name`.
fn last_value<'a>(rows: &'a [Property], name: &str) -> Option<&'a str> {
    rows.iter()
        .rev()
        .filter(|p| p.name == name)
        .map(|p| p.value.trim())
        .find(|v| !v.is_empty())
}
