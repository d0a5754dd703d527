//! TOML file property source.
//!
//! Reads a document of the form:
//!
//! ```toml
//! [environments.QA13]
//! "vault.addr" = "https://vaultops.example/"
//! "vault.role_id" = "..."
//! "vault.secret_id" = "..."
//! ```
//!
//! The file is read once per `fetch` and not kept open.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use super::{Property, PropertySource, SourceLocation};
use crate::core::domain::Environment;
use crate::error::SourceError;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    environments: BTreeMap<String, BTreeMap<String, toml::Value>>,
}

/// Property source backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileSource {
    location: SourceLocation,
}

impl FileSource {
    pub fn new(location: SourceLocation) -> Self {
        Self { location }
    }
}

impl PropertySource for FileSource {
    fn fetch(&self, environment: &Environment) -> Result<Vec<Property>, SourceError> {
        let path = self.location.path_for(environment.as_str())?;
        debug!(path = %path.display(), "reading property file");

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| SourceError(format!("failed to read {}: {}", path.display(), e)))?;
        let document: Document = toml::from_str(&contents)
            .map_err(|e| SourceError(format!("failed to parse {}: {}", path.display(), e)))?;

        let Some(table) = document.environments.get(environment.as_str()) else {
            return Ok(Vec::new());
        };

        table
            .iter()
            .map(|(name, value)| match value {
                toml::Value::String(s) => Ok(Property::new(name.as_str(), s.as_str())),
                other => Err(SourceError(format!(
                    "malformed row: property '{}' is a {}, expected a string",
                    name,
                    other.type_str()
                ))),
            })
            .collect()
    }
}
