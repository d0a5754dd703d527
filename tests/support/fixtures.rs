//! Test fixtures and constants.

use super::Test;
use std::fs;

/// Mount used across the check tests.
pub const MOUNT: &str = "nodalsuite/qa13/kv";

/// Path within [`MOUNT`].
pub const SECRET_PATH: &str = "rabbitmq/admin";

/// Store API path for [`MOUNT`] and [`SECRET_PATH`].
pub const API_PATH: &str = "/v1/nodalsuite/qa13/kv/data/rabbitmq/admin";

/// Payload value that must never reach the tool's output.
pub const SENTINEL: &str = "SENTINEL-do-not-print-7f3a";

pub const ROLE_ID: &str = "role-1234";
pub const SECRET_ID: &str = "secret-5678-hush";

/// Config selecting the TOML property file written by `write_properties`.
pub const FILE_SOURCE_CONFIG: &str = r#"
[source]
kind = "file"
path = "properties.toml"
"#;

impl Test {
    /// Write `.vaultprobe.toml` in the project dir.
    pub fn write_config(&self, contents: &str) {
        fs::write(self.dir.path().join(".vaultprobe.toml"), contents)
            .expect("failed to write config");
    }

    /// Write `properties.toml` with one environment table.
    pub fn write_properties(&self, environment: &str, rows: &[(&str, &str)]) {
        let mut doc = format!("[environments.{}]\n", environment);
        for (name, value) in rows {
            doc.push_str(&format!("\"{}\" = \"{}\"\n", name, value));
        }
        fs::write(self.dir.path().join("properties.toml"), doc)
            .expect("failed to write properties");
    }
}

/// Complete credential rows pointing at `addr`.
pub fn credentials(addr: &str) -> Vec<(&str, &str)> {
    vec![
        ("vault.addr", addr),
        ("vault.role_id", ROLE_ID),
        ("vault.secret_id", SECRET_ID),
    ]
}
