//! Scripted secret store for tests.

use std::sync::{Arc, Mutex};

use zeroize::Zeroizing;

use super::{Connector, SecretStore};
use crate::core::domain::{IdentityPair, SecretCoordinate, StoreAddress};
use crate::core::types::ClientToken;
use crate::error::{StoreError, TransportError};

/// Canned answers plus a shared log of the calls made.
#[derive(Debug, Clone)]
pub struct MockConnector {
    pub connect: Result<(), TransportError>,
    pub login: Result<String, StoreError>,
    pub lookup: Result<(), StoreError>,
    pub read: Result<(), StoreError>,
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            connect: Ok(()),
            login: Ok("hvs.mock".to_string()),
            lookup: Ok(()),
            read: Ok(()),
            calls: Arc::default(),
        }
    }
}

impl MockConnector {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[derive(Debug)]
pub struct MockStore {
    address: StoreAddress,
    script: MockConnector,
}

impl Connector for MockConnector {
    fn connect(&self, address: &StoreAddress) -> Result<Box<dyn SecretStore>, TransportError> {
        self.record(format!("connect {}", address));
        self.connect.clone()?;
        Ok(Box::new(MockStore {
            address: address.clone(),
            script: self.clone(),
        }))
    }
}

impl SecretStore for MockStore {
    fn address(&self) -> &StoreAddress {
        &self.address
    }

    fn login(&self, identity: &IdentityPair) -> Result<ClientToken, StoreError> {
        self.script.record(format!("login {}", identity.role_id()));
        self.script.login.clone().map(Zeroizing::new)
    }

    fn lookup_self(&self, _token: &str) -> Result<(), StoreError> {
        self.script.record("lookup-self".to_string());
        self.script.lookup.clone()
    }

    fn read_latest(&self, _token: &str, coordinate: &SecretCoordinate) -> Result<(), StoreError> {
        self.script.record(format!("read {}", coordinate.api_path()));
        self.script.read.clone()
    }
}
