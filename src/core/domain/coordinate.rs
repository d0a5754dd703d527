//! Secret coordinate.
//!
//! Identifies where a KV v2 entry lives. Two calling conventions are
//! accepted and normalised here, once:
//!
//! - mount-relative: mount `nodalsuite/qa13/kv`, path `rabbitmq/admin`
//! - fully qualified: empty mount, path `nodalsuite/qa13/kv/data/rabbitmq/admin`

use crate::error::ValidationError;

/// API segment separating the mount from the entry path in KV v2 URLs.
const DATA_SEGMENT: &str = "data";

/// Location of a KV v2 entry: (mount, path-within-mount).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretCoordinate {
    mount: String,
    path: String,
}

impl SecretCoordinate {
    /// Normalise a (mount, path) pair.
    ///
    /// With a non-empty `mount`, `path` is relative to it. With an empty
    /// `mount`, `path` must embed the mount as `<mount>/data/<path>` and is
    /// split at the first `data` segment.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCoordinate` for empty paths, empty or
    /// dot segments, and fully-qualified paths without a `data` segment.
    pub fn new(mount: &str, path: &str) -> Result<Self, ValidationError> {
        let mount = mount.trim().trim_matches('/');
        let path = path.trim().trim_matches('/');
        let invalid = |reason: &str| ValidationError::InvalidCoordinate {
            coordinate: if mount.is_empty() {
                path.to_string()
            } else {
                format!("{}/{}", mount, path)
            },
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        let (mount, path) = if mount.is_empty() {
            split_qualified(path).ok_or_else(|| {
                invalid("fully-qualified path must look like <mount>/data/<path>")
            })?
        } else {
            (mount, path)
        };

        for segment in mount.split('/').chain(path.split('/')) {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(invalid("empty or relative path segment"));
            }
        }

        Ok(Self {
            mount: mount.to_string(),
            path: path.to_string(),
        })
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// KV v2 API path for the latest version: `<mount>/data/<path>`.
    pub fn api_path(&self) -> String {
        format!("{}/{}/{}", self.mount, DATA_SEGMENT, self.path)
    }
}

/// Split `<mount>/data/<path>` at the first `data` segment.
fn split_qualified(qualified: &str) -> Option<(&str, &str)> {
    let marker = format!("/{}/", DATA_SEGMENT);
    let (mount, path) = qualified.split_once(marker.as_str())?;
    if mount.is_empty() || path.is_empty() {
        return None;
    }
    Some((mount, path))
}

impl std::fmt::Display for SecretCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.mount, self.path)
    }
}
