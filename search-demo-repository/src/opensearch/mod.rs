//! OpenSearch implementation of the search provider.
//!
//! This module provides a concrete implementation of `SearchProvider`
//! using the `opensearch` crate as the HTTP client.

mod index_config;
mod provider;

pub use index_config::{get_index_settings, IndexConfig, DEFAULT_INDEX_NAME};
pub use provider::OpenSearchProvider;
