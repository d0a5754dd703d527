//! Configuration file management.
//!
//! Handles reading and validating `.vaultprobe.toml`: where the property
//! store lives, which property names hold the credentials, and how to talk
//! to the secret store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::constants;
use crate::core::resolve::SourceLocation;
use crate::core::types::PropertyName;
use crate::core::vault::StoreOptions;
use crate::error::{ConfigError, Result};

/// Tool configuration stored in `.vaultprobe.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Configuration property store
    pub source: SourceConfig,
    /// Property names holding the credentials
    pub properties: PropertyNames,
    /// Secret-store client settings
    pub vault: VaultConfig,
    /// Directory relative source paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Kind of configuration property store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// SQLite database queried per environment
    #[default]
    Sqlite,
    /// TOML file with an `[environments.<ENV>]` table per environment
    File,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::File => "file",
        }
    }
}

/// Where and how to query the configuration property store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Store location; `{environment}` is substituted per call.
    pub path: Option<String>,
    /// SQLite query returning (name, value) rows; `?1` is the environment.
    pub query: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: None,
            query: constants::DEFAULT_QUERY.to_string(),
        }
    }
}

/// Property names the resolver extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyNames {
    pub address: PropertyName,
    pub role_id: PropertyName,
    pub secret_id: PropertyName,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            address: constants::DEFAULT_ADDRESS_PROPERTY.to_string(),
            role_id: constants::DEFAULT_ROLE_ID_PROPERTY.to_string(),
            secret_id: constants::DEFAULT_SECRET_ID_PROPERTY.to_string(),
        }
    }
}

/// Secret-store client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// AppRole auth mount (`auth/<mount>/login`)
    pub approle_mount: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Vault Enterprise namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Accept invalid TLS certificates
    pub tls_skip_verify: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            approle_mount: constants::DEFAULT_APPROLE_MOUNT.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            namespace: None,
            tls_skip_verify: false,
        }
    }
}

impl VaultConfig {
    /// Client options derived from this section.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            approle_mount: self.approle_mount.trim_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            namespace: self.namespace.clone().filter(|ns| !ns.trim().is_empty()),
            tls_skip_verify: self.tls_skip_verify,
        }
    }
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Per-user fallback location (`<config dir>/vaultprobe/config.toml`)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vaultprobe").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `.vaultprobe.toml` in the
    /// current directory is tried, then the per-user file; if neither exists
    /// the built-in defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit file,
    /// `ConfigError::Parse` for malformed TOML, or a validation error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::load_from(path);
        }

        let candidates = std::iter::once(Self::config_path()).chain(Self::user_config_path());
        for path in candidates {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        debug!("no config file found, using defaults");
        let mut config = Self::default();
        config.base_dir = std::env::current_dir()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        config.base_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => std::env::current_dir()?,
        };

        config.validate()?;

        debug!(source = config.source.kind.name(), "config loaded");
        Ok(config)
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Property names are non-empty and distinct
    /// - The AppRole mount is non-empty
    /// - The timeout is positive
    /// - A configured source path is non-empty
    /// - The SQLite query binds the environment as `?1`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        let names = [
            ("properties.address", &self.properties.address),
            ("properties.role_id", &self.properties.role_id),
            ("properties.secret_id", &self.properties.secret_id),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "property name cannot be empty".to_string(),
                }
                .into());
            }
        }
        if self.properties.address == self.properties.role_id
            || self.properties.address == self.properties.secret_id
            || self.properties.role_id == self.properties.secret_id
        {
            return Err(ConfigError::InvalidValue {
                field: "properties",
                reason: "property names must be distinct".to_string(),
            }
            .into());
        }

        if self.vault.approle_mount.trim_matches('/').trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "vault.approle_mount",
                reason: "mount cannot be empty".to_string(),
            }
            .into());
        }

        if self.vault.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "vault.timeout_secs",
                reason: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        if let Some(path) = &self.source.path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "source.path",
                    reason: "path cannot be empty".to_string(),
                }
                .into());
            }
        }

        if self.source.kind == SourceKind::Sqlite && !self.source.query.contains("?1") {
            return Err(ConfigError::InvalidValue {
                field: "source.query",
                reason: "query must bind the environment as ?1".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Location template of the property store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when no source path is configured.
    pub fn source_location(&self) -> Result<SourceLocation> {
        let template = self
            .source
            .path
            .as_deref()
            .ok_or(ConfigError::MissingField {
                field: "source.path",
            })?;
        Ok(SourceLocation::new(template, &self.base_dir))
    }
}
