//! Fake secret store for CLI tests.
//!
//! Runs a wiremock server on its own runtime so the test thread can drive
//! the binary synchronously while the server answers.

use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{API_PATH, SENTINEL};

/// Token the fake store hands out on login.
pub const ISSUED_TOKEN: &str = "hvs.issued-by-fake";

pub struct Vault {
    server: MockServer,
    rt: Runtime,
}

impl Vault {
    /// Start an empty server. Unmatched requests get 404.
    pub fn start() -> Self {
        let rt = Runtime::new().expect("failed to start runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    /// Start a server that accepts any AppRole login and grants the read
    /// at the standard fixture path.
    pub fn granting() -> Self {
        let v = Self::start();
        v.accept_login();
        v.secret(200);
        v
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    /// Accept AppRole logins and token lookups.
    pub fn accept_login(&self) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/v1/auth/approle/login"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "auth": { "client_token": ISSUED_TOKEN, "lease_duration": 60 }
                }))),
        );
        self.mount(
            Mock::given(method("GET"))
                .and(path("/v1/auth/token/lookup-self"))
                .and(header("X-Vault-Token", ISSUED_TOKEN))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": { "policies": ["default"] }
                }))),
        );
    }

    /// Reject AppRole logins the way the store does for a bad secret ID.
    pub fn reject_login(&self) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/v1/auth/approle/login"))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "errors": ["invalid role or secret ID"]
                }))),
        );
    }

    /// Answer reads of the fixture path with `status`.
    ///
    /// A 200 carries [`SENTINEL`] in its payload.
    pub fn secret(&self, status: u16) {
        let body = match status {
            200 => json!({ "data": { "data": { "password": SENTINEL }, "metadata": { "version": 3 } } }),
            403 => json!({ "errors": ["1 error occurred:\n\t* permission denied\n\n"] }),
            _ => json!({ "errors": [] }),
        };
        self.mount(
            Mock::given(method("GET"))
                .and(path(API_PATH))
                .respond_with(ResponseTemplate::new(status).set_body_json(body)),
        );
    }

    /// Number of requests the server has received.
    pub fn request_count(&self) -> usize {
        self.rt
            .block_on(self.server.received_requests())
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

/// An address nothing listens on.
pub const REFUSED_ADDR: &str = "http://127.0.0.1:1";
