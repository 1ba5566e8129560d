//! Search service implementation.
//!
//! This module provides the main service for talking to the search server.
//! Application code uses this instead of a provider directly: the service
//! validates index names, document ids and raw JSON bodies before any request
//! is sent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::SearchError;
use crate::interfaces::SearchProvider;
use crate::types::{FetchedDocument, IndexedDocument, PingInfo};

/// Maximum length in bytes of a document id accepted by the server.
pub const MAX_DOCUMENT_ID_BYTES: usize = 512;

/// Maximum length in bytes of an index name accepted by the server.
pub const MAX_INDEX_NAME_BYTES: usize = 255;

/// Characters the server rejects anywhere in an index name.
const FORBIDDEN_INDEX_CHARS: &[char] = &[
    '\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', ' ', ':',
];

/// What [`SearchService::ensure_index`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureIndexOutcome {
    /// The index was already there.
    AlreadyExists,
    /// The index was created; `acknowledged` is the server's answer.
    Created { acknowledged: bool },
}

/// The main service for interacting with the search server.
///
/// This is the high-level API that application code should use. It provides
/// input validation and delegates to a `SearchProvider` for the actual
/// requests.
///
/// # Example
///
/// ```no_run
/// use search_demo_repository::{canonicalize, OpenSearchProvider, ProviderConfig, SearchService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let endpoints = canonicalize(["http://localhost:9200/"]);
/// let provider = OpenSearchProvider::new(ProviderConfig::new(endpoints)).await?;
/// let service = SearchService::new(Box::new(provider));
///
/// service.ensure_index("twitter", None).await?;
/// service
///     .index_raw("twitter", "2", r#"{"user" : "olivere", "message" : "It's a Raggy Waltz"}"#)
///     .await?;
/// service.flush("twitter").await?;
/// # Ok(())
/// # }
/// ```
pub struct SearchService {
    provider: Box<dyn SearchProvider>,
}

impl SearchService {
    /// Create a new SearchService.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `SearchProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Box<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Validate an index name against the server's naming rules.
    fn validate_index_name(index: &str) -> Result<(), SearchError> {
        if index.is_empty() {
            return Err(SearchError::validation("index name is required"));
        }
        if index.len() > MAX_INDEX_NAME_BYTES {
            return Err(SearchError::validation(format!(
                "index name must be at most {} bytes",
                MAX_INDEX_NAME_BYTES
            )));
        }
        if index == "." || index == ".." {
            return Err(SearchError::validation(format!(
                "index name cannot be '{}'",
                index
            )));
        }
        if index.starts_with(['_', '-', '+']) {
            return Err(SearchError::validation(format!(
                "index name '{}' cannot start with '_', '-' or '+'",
                index
            )));
        }
        if index.chars().any(|c| c.is_uppercase()) {
            return Err(SearchError::validation(format!(
                "index name '{}' must be lowercase",
                index
            )));
        }
        if let Some(c) = index.chars().find(|c| FORBIDDEN_INDEX_CHARS.contains(c)) {
            return Err(SearchError::validation(format!(
                "index name '{}' contains invalid character '{}'",
                index, c
            )));
        }
        Ok(())
    }

    /// Validate a document id.
    fn validate_document_id(id: &str) -> Result<(), SearchError> {
        if id.is_empty() {
            return Err(SearchError::validation("document id is required"));
        }
        if id.len() > MAX_DOCUMENT_ID_BYTES {
            return Err(SearchError::validation(format!(
                "document id must be at most {} bytes",
                MAX_DOCUMENT_ID_BYTES
            )));
        }
        Ok(())
    }

    /// Parse a raw JSON string into a document body.
    ///
    /// The body must be a JSON object.
    fn parse_raw_document(raw: &str) -> Result<Value, SearchError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| SearchError::validation(format!("document is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(SearchError::validation("document must be a JSON object"));
        }
        Ok(value)
    }

    /// Ping the server and return its status code and cluster info.
    pub async fn ping(&self) -> Result<PingInfo, SearchError> {
        self.provider.ping().await
    }

    /// Return the server version number.
    pub async fn server_version(&self) -> Result<String, SearchError> {
        self.provider.server_version().await
    }

    /// Check whether an index exists.
    pub async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        Self::validate_index_name(index)?;
        self.provider.index_exists(index).await
    }

    /// Create an index, returning the server's acknowledged flag.
    pub async fn create_index(&self, index: &str, body: Option<&Value>) -> Result<bool, SearchError> {
        Self::validate_index_name(index)?;
        self.provider.create_index(index, body).await
    }

    /// Create the index unless it already exists.
    ///
    /// An unacknowledged creation is not an error; it is logged and reported
    /// through the returned outcome.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `body` - Optional settings and mappings used if the index is created
    pub async fn ensure_index(
        &self,
        index: &str,
        body: Option<&Value>,
    ) -> Result<EnsureIndexOutcome, SearchError> {
        Self::validate_index_name(index)?;

        if self.provider.index_exists(index).await? {
            debug!(index = %index, "Index already exists");
            return Ok(EnsureIndexOutcome::AlreadyExists);
        }

        let acknowledged = self.provider.create_index(index, body).await?;
        if acknowledged {
            info!(index = %index, "Index created");
        } else {
            warn!(index = %index, "Index creation was not acknowledged");
        }

        Ok(EnsureIndexOutcome::Created { acknowledged })
    }

    /// Index a serializable document under the given id.
    pub async fn index_json<T>(
        &self,
        index: &str,
        id: &str,
        document: &T,
    ) -> Result<IndexedDocument, SearchError>
    where
        T: Serialize + Sync + ?Sized,
    {
        Self::validate_index_name(index)?;
        Self::validate_document_id(id)?;

        let body = serde_json::to_value(document)?;
        if !body.is_object() {
            return Err(SearchError::validation("document must serialize to a JSON object"));
        }

        self.provider.index_document(index, id, &body).await
    }

    /// Index a document given as a raw JSON string.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexedDocument)` - The server's index response
    /// * `Err(SearchError::ValidationError)` - If the string is not a JSON object
    /// * `Err(SearchError)` - If the request fails
    pub async fn index_raw(
        &self,
        index: &str,
        id: &str,
        raw: &str,
    ) -> Result<IndexedDocument, SearchError> {
        Self::validate_index_name(index)?;
        Self::validate_document_id(id)?;

        let body = Self::parse_raw_document(raw)?;
        self.provider.index_document(index, id, &body).await
    }

    /// Get a document by id. A missing document yields `found == false`.
    pub async fn get(&self, index: &str, id: &str) -> Result<FetchedDocument, SearchError> {
        Self::validate_index_name(index)?;
        Self::validate_document_id(id)?;
        self.provider.get_document(index, id).await
    }

    /// Get a document by id and deserialize its source.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - If the document exists
    /// * `Ok(None)` - If it does not
    /// * `Err(SearchError::ParseError)` - If the source does not match `T`
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<T>, SearchError> {
        self.get(index, id).await?.source_as()
    }

    /// Flush an index so pending writes are persisted.
    pub async fn flush(&self, index: &str) -> Result<(), SearchError> {
        Self::validate_index_name(index)?;
        self.provider.flush(index).await
    }
}
