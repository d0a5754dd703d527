//! Secret-store address.

use url::Url;

use crate::error::ValidationError;

/// Network endpoint of the secret store.
///
/// Always an `http` or `https` URL with a host. The trailing slash is dropped
/// so API paths can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAddress {
    base: String,
}

impl StoreAddress {
    /// Parse and validate a store address.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidAddress` for unparsable URLs, schemes
    /// other than http(s), missing hosts, or URLs carrying a query or fragment.
    pub fn parse(address: &str) -> Result<Self, ValidationError> {
        let trimmed = address.trim();
        let invalid = |reason: &str| ValidationError::InvalidAddress {
            address: trimmed.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("address is empty"));
        }

        let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(&format!("unsupported scheme '{}'", other))),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed"));
        }

        Ok(Self {
            base: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Full URL of a `/v1/` API path.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base, path.trim_start_matches('/'))
    }
}

impl std::fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}
