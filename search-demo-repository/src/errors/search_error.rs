//! Search error types.
//!
//! This module defines the unified error type for every call made against the
//! search server, plus the local validation performed before a call is made.

use thiserror::Error;

/// Unified errors from search operations.
///
/// Used by the `SearchProvider` trait and `SearchService`. Backend failures carry
/// the HTTP status and response body as text so they can be logged and cloned
/// freely.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// Validation error (e.g., empty document id, malformed index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No usable endpoint was left after canonicalization.
    #[error("No usable search endpoints: {0}")]
    NoEndpoints(String),

    /// Failed to establish a connection to the search server.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The ping (cluster info) request failed.
    #[error("Ping error: {0}")]
    PingError(String),

    /// Failed to check whether an index exists.
    #[error("Index exists error: {0}")]
    IndexExistsError(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to get a document.
    #[error("Get error: {0}")]
    GetError(String),

    /// Failed to flush an index.
    #[error("Flush error: {0}")]
    FlushError(String),

    /// Failed to parse a response from the search server.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a no-endpoints error.
    pub fn no_endpoints(msg: impl Into<String>) -> Self {
        Self::NoEndpoints(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a ping error.
    pub fn ping(msg: impl Into<String>) -> Self {
        Self::PingError(msg.into())
    }

    /// Create an index exists error.
    pub fn index_exists(msg: impl Into<String>) -> Self {
        Self::IndexExistsError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a get error.
    pub fn get(msg: impl Into<String>) -> Self {
        Self::GetError(msg.into())
    }

    /// Create a flush error.
    pub fn flush(msg: impl Into<String>) -> Self {
        Self::FlushError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
