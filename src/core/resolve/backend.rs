//! Property source selection.
//!
//! Builds the configured `PropertySource` from `.vaultprobe.toml`.

use tracing::debug;

use super::{FileSource, PropertySource};
use crate::core::config::{Config, SourceKind};
use crate::error::Result;

/// Build the property source described by the config.
///
/// # Errors
///
/// Returns `ConfigError::MissingField` when no source path is configured, or
/// `ConfigError::UnsupportedSource` for a backend compiled out of this build.
pub fn source_for(config: &Config) -> Result<Box<dyn PropertySource>> {
    let location = config.source_location()?;
    debug!(kind = config.source.kind.name(), "using property source");

    match config.source.kind {
        SourceKind::File => Ok(Box::new(FileSource::new(location))),
        #[cfg(feature = "sqlite")]
        SourceKind::Sqlite => Ok(Box::new(super::SqliteSource::new(
            location,
            config.source.query.clone(),
        ))),
        #[cfg(not(feature = "sqlite"))]
        SourceKind::Sqlite => {
            Err(crate::error::ConfigError::UnsupportedSource("sqlite".to_string()).into())
        }
    }
}
