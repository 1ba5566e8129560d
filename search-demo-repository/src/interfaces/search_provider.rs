//! Search provider trait definition.
//!
//! This module defines the abstract interface to the remote search server,
//! allowing for different backend implementations and mock providers in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{FetchedDocument, IndexedDocument, PingInfo};

/// Abstracts the remote search server (Elasticsearch, OpenSearch, ...).
///
/// Every method is a single request against the server; none of them retry.
/// Implementations are injected into `SearchService` as a boxed trait object.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Request the cluster info and report the HTTP status with it.
    async fn ping(&self) -> Result<PingInfo, SearchError>;

    /// Return the server version number.
    ///
    /// The default implementation reads it from [`SearchProvider::ping`].
    async fn server_version(&self) -> Result<String, SearchError> {
        Ok(self.ping().await?.info.version.number)
    }

    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the server answered 200
    /// * `Ok(false)` - If the server answered 404
    /// * `Err(SearchError)` - On any other status or transport failure
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create an index, optionally with settings and mappings.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - The `acknowledged` flag reported by the server
    /// * `Err(SearchError)` - If the index could not be created
    async fn create_index(&self, index: &str, body: Option<&Value>) -> Result<bool, SearchError>;

    /// Index (create or replace) a JSON document under the given id.
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<IndexedDocument, SearchError>;

    /// Get a document by id.
    ///
    /// A missing document is not an error: the result has `found == false`.
    async fn get_document(&self, index: &str, id: &str) -> Result<FetchedDocument, SearchError>;

    /// Flush an index so pending writes are persisted.
    async fn flush(&self, index: &str) -> Result<(), SearchError>;
}
