//! Vault HTTP API client.
//!
//! Blocking `reqwest` client for the three calls the pipeline makes:
//! AppRole login, token self-lookup and KV v2 reads. The body of a
//! successful read is dropped without being read. Error bodies are parsed
//! only for the store's `errors` array.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::{Connector, SecretStore, StoreOptions};
use crate::core::constants;
use crate::core::domain::{IdentityPair, SecretCoordinate, StoreAddress};
use crate::core::types::ClientToken;
use crate::error::{StoreError, TransportError};

/// Longest store diagnostic kept in an error message.
const MAX_DIAGNOSTIC_LEN: usize = 512;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Builds [`HttpStore`] clients with shared options.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    options: StoreOptions,
}

impl HttpConnector {
    pub fn new(options: StoreOptions) -> Self {
        Self { options }
    }
}

impl Connector for HttpConnector {
    fn connect(&self, address: &StoreAddress) -> Result<Box<dyn SecretStore>, TransportError> {
        Ok(Box::new(HttpStore::new(address.clone(), &self.options)?))
    }
}

/// Vault REST API client bound to one address.
#[derive(Debug, Clone)]
pub struct HttpStore {
    http: Client,
    address: StoreAddress,
    approle_mount: String,
    namespace: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: Option<AuthBlock>,
}

#[derive(Deserialize)]
struct AuthBlock {
    #[serde(default)]
    client_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

impl HttpStore {
    /// Build the user-agent string from crate version.
    fn user_agent() -> String {
        format!("vaultprobe/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Create a client for `address`.
    ///
    /// # Errors
    ///
    /// Returns a network `TransportError` if the TLS backend cannot be
    /// initialised.
    pub fn new(address: StoreAddress, options: &StoreOptions) -> Result<Self, TransportError> {
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.tls_skip_verify)
            .build()
            .map_err(|e| {
                TransportError::network(format!("failed to build HTTP client: {}", chain(&e)))
            })?;

        Ok(Self {
            http,
            address,
            approle_mount: options.approle_mount.trim_matches('/').to_string(),
            namespace: options.namespace.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.address.api_url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(namespace) = &self.namespace {
            req = req.header(constants::NAMESPACE_HEADER, namespace);
        }
        req
    }

    fn send(&self, req: RequestBuilder, what: &str) -> Result<Response, TransportError> {
        let resp = req.send().map_err(|e| classify_send_error(what, e))?;
        debug!(call = what, status = resp.status().as_u16(), "store responded");
        Ok(resp)
    }
}

impl SecretStore for HttpStore {
    fn address(&self) -> &StoreAddress {
        &self.address
    }

    fn login(&self, identity: &IdentityPair) -> Result<ClientToken, StoreError> {
        let path = format!("auth/{}/login", encode_path(&self.approle_mount));
        let req = self.request(Method::POST, &path).json(&LoginRequest {
            role_id: identity.role_id(),
            secret_id: identity.secret_id(),
        });
        let resp = self.send(req, "login")?;

        match resp.status() {
            StatusCode::OK => {
                let body: LoginResponse = resp.json().map_err(|e| {
                    TransportError::protocol(format!("undecodable login response: {}", chain(&e)))
                })?;
                let token = Zeroizing::new(body.auth.map(|a| a.client_token).unwrap_or_default());
                if token.is_empty() {
                    return Err(StoreError::Denied(
                        "login response carried no client token".to_string(),
                    ));
                }
                Ok(token)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::Denied(diagnostic(resp)))
            }
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!(
                "no AppRole auth method at auth/{}: {}",
                self.approle_mount,
                diagnostic(resp)
            ))),
            _ => Err(unexpected_status(resp).into()),
        }
    }

    fn lookup_self(&self, token: &str) -> Result<(), StoreError> {
        let req = self
            .request(Method::GET, "auth/token/lookup-self")
            .header(constants::TOKEN_HEADER, token);
        let resp = self.send(req, "lookup-self")?;

        match resp.status() {
            StatusCode::OK => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::Denied(diagnostic(resp)))
            }
            _ => Err(unexpected_status(resp).into()),
        }
    }

    fn read_latest(&self, token: &str, coordinate: &SecretCoordinate) -> Result<(), StoreError> {
        let req = self
            .request(Method::GET, &encode_path(&coordinate.api_path()))
            .header(constants::TOKEN_HEADER, token);
        let resp = self.send(req, "read")?;

        match resp.status() {
            // payload dropped unread
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::Denied(diagnostic(resp)))
            }
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!(
                "no entry at {}",
                coordinate
            ))),
            _ => Err(unexpected_status(resp).into()),
        }
    }
}

/// Map a failed send to a transport error class.
fn classify_send_error(what: &str, err: reqwest::Error) -> TransportError {
    let message = format!("{} request failed: {}", what, chain(&err));
    if err.is_connect() || err.is_timeout() || err.is_request() {
        TransportError::network(message)
    } else if err.is_decode() || err.is_body() {
        TransportError::protocol(message)
    } else {
        TransportError::unexpected(message)
    }
}

/// Error for a status the caller has no specific meaning for.
fn unexpected_status(resp: Response) -> TransportError {
    let status = resp.status();
    TransportError::unexpected(format!("store returned {}: {}", status, diagnostic(resp)))
}

/// Human-readable diagnostic from a non-success response.
///
/// Only the `errors` array is kept; anything else in the body is ignored.
fn diagnostic(resp: Response) -> String {
    let status = resp.status();
    let errors = resp
        .text()
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .map(|body| body.errors)
        .unwrap_or_default();

    let joined = errors
        .iter()
        .map(|e| e.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    let message = if joined.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no diagnostic")
            .to_lowercase()
    } else {
        joined
    };
    truncate(message)
}

fn truncate(mut message: String) -> String {
    if message.len() > MAX_DIAGNOSTIC_LEN {
        let mut cut = MAX_DIAGNOSTIC_LEN;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
        message.push('…');
    }
    message
}

/// Render an error with its source chain.
fn chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        let text = s.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = s.source();
    }
    out
}

/// Percent-encode a single URL path segment.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

/// Percent-encode each segment of a slash-delimited path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}
