//! Error types for the demo run.

use search_demo_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while the demo talks to the search server.
#[derive(Error, Debug)]
pub enum DemoError {
    /// A search request failed.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Writing demo output failed.
    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        Self::OutputError(err.to_string())
    }
}
