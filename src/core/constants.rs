//! Constants used throughout vaultprobe.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.vaultprobe.toml).
pub const CONFIG_FILE: &str = ".vaultprobe.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "VAULTPROBE_LOG";

/// Placeholder substituted with the environment identifier in source paths.
pub const ENVIRONMENT_PLACEHOLDER: &str = "{environment}";

/// Default property holding the secret-store address.
pub const DEFAULT_ADDRESS_PROPERTY: &str = "vault.addr";

/// Default property holding the AppRole role_id.
pub const DEFAULT_ROLE_ID_PROPERTY: &str = "vault.role_id";

/// Default property holding the AppRole secret_id.
pub const DEFAULT_SECRET_ID_PROPERTY: &str = "vault.secret_id";

/// Default SQLite query; `?1` is bound to the environment identifier.
pub const DEFAULT_QUERY: &str = "SELECT name, value FROM properties WHERE environment = ?1";

/// Default AppRole auth mount.
pub const DEFAULT_APPROLE_MOUNT: &str = "approle";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the client token.
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Header selecting a Vault Enterprise namespace.
pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";
