//! vaultprobe - pre-flight check that credentials can read a Vault secret.
//!
//! Confirms that deployment automation will be able to fetch a KV v2 secret
//! at runtime, without ever reading or exposing the secret itself.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── check         # Run a validation and report the verdict
//! │   ├── resolve       # Check configuration-store provisioning only
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .vaultprobe.toml management
//!     ├── domain/       # Environment, address, identity, coordinate, verdict
//!     ├── resolve/      # Credential resolver and property sources
//!     │   ├── mod       # PropertySource trait
//!     │   ├── sqlite    # SQLite property store
//!     │   └── file      # TOML property file
//!     ├── vault/        # Secret-store client
//!     │   ├── mod       # SecretStore and Connector traits
//!     │   ├── http      # Vault HTTP API implementation
//!     │   └── session   # Authenticated session
//!     ├── auth          # Identity exchanger
//!     ├── probe         # Access prober
//!     ├── pipeline      # Validation orchestrator
//!     └── diagnostics   # Injected diagnostics sink
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vaultprobe::core::diagnostics::TracingDiagnostics;
//! use vaultprobe::core::domain::{IdentityPair, SecretCoordinate, StoreAddress};
//! use vaultprobe::core::pipeline::{Request, Validator};
//! use vaultprobe::core::vault::HttpConnector;
//!
//! let connector = HttpConnector::default();
//! let diagnostics = TracingDiagnostics;
//! let validator = Validator::new(&connector, &diagnostics);
//!
//! let request = Request::Identity {
//!     address: StoreAddress::parse("https://vaultops.example/")?,
//!     identity: IdentityPair::new("role-id", "secret-id")?,
//! };
//! let coordinate = SecretCoordinate::new("nodalsuite/qa13/kv", "rabbitmq/admin")?;
//!
//! let verdict = validator.validate(&request, &coordinate);
//! println!("{}", verdict);
//! # Ok::<(), vaultprobe::error::ValidationError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
