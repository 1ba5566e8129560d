//! # Search Demo
//!
//! Demonstration client for an Elasticsearch-compatible search server.
//!
//! ## Flow
//!
//! 1. **Config**: read raw endpoints and options from the environment and
//!    canonicalize the endpoints
//! 2. **Dependencies**: connect to the first reachable endpoint
//! 3. **Demo**: ping, read the version, create the index if absent, index two
//!    tweets, get one back and flush
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency wiring
//! - [`demo`]: The demo sequence
//! - [`errors`]: Error types for the demo run

pub mod config;
pub mod demo;
pub mod errors;

pub use config::{DemoConfig, Dependencies};
pub use errors::DemoError;

use thiserror::Error;

/// Errors that can occur during startup or while running the demo.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Demo error.
    #[error("Demo error: {0}")]
    DemoError(#[from] DemoError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
