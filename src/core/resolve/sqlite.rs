//! SQLite property source.
//!
//! Opens the database read-only for each `fetch`, runs the configured query
//! with the environment bound to `?1`, and closes the connection when the
//! call returns.

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use super::{Property, PropertySource, SourceLocation};
use crate::core::domain::Environment;
use crate::error::SourceError;

/// Property source backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    location: SourceLocation,
    query: String,
}

impl SqliteSource {
    pub fn new(location: SourceLocation, query: impl Into<String>) -> Self {
        Self {
            location,
            query: query.into(),
        }
    }
}

impl PropertySource for SqliteSource {
    fn fetch(&self, environment: &Environment) -> Result<Vec<Property>, SourceError> {
        let path = self.location.path_for(environment.as_str())?;
        debug!(path = %path.display(), "opening property database");

        if !path.exists() {
            return Err(SourceError(format!(
                "database not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| SourceError(format!("failed to open {}: {}", path.display(), e)))?;

        let mut stmt = conn
            .prepare(&self.query)
            .map_err(|e| SourceError(format!("invalid query: {}", e)))?;

        let rows = stmt
            .query_map([environment.as_str()], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
            })
            .map_err(|e| SourceError(format!("query failed: {}", e)))?;

        let mut properties = Vec::new();
        for row in rows {
            let (name, value) = row.map_err(|e| SourceError(format!("malformed row: {}", e)))?;
            let name = name.ok_or_else(|| SourceError("malformed row: NULL property name".into()))?;
            // NULL values read as empty and are reported as missing by the resolver
            properties.push(Property::new(name, value.unwrap_or_default()));
        }

        debug!(rows = properties.len(), "property query complete");
        Ok(properties)
    }
}
