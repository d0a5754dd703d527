//! In-memory property source.
//!
//! For callers that already hold their configuration properties, and for
//! tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Property, PropertySource};
use crate::core::domain::Environment;
use crate::error::SourceError;

/// Property rows keyed by environment identifier.
#[derive(Debug, Default)]
pub struct MemorySource {
    environments: HashMap<String, Vec<Property>>,
    calls: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rows for one environment.
    pub fn with_environment(mut self, environment: &str, rows: Vec<Property>) -> Self {
        self.environments.insert(environment.to_string(), rows);
        self
    }

    /// Number of `fetch` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PropertySource for MemorySource {
    fn fetch(&self, environment: &Environment) -> Result<Vec<Property>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .environments
            .get(environment.as_str())
            .cloned()
            .unwrap_or_default())
    }
}
