//! Core library components.
//!
//! This module contains the credential-resolution-and-access-probe pipeline
//! and the configuration it runs on.

pub mod auth;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod domain;
pub mod pipeline;
pub mod probe;
pub mod resolve;
pub mod types;
pub mod vault;
