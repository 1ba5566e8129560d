//! # Search Demo Repository
//!
//! This crate provides everything the demo needs to talk to a remote search
//! server: endpoint URL canonicalization, the `SearchProvider` trait, an
//! implementation on top of the `opensearch` client, and the validating
//! `SearchService` facade.

pub mod config;
pub mod endpoints;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use config::{BasicAuth, ProviderConfig};
pub use endpoints::{canonicalize, canonicalize_with_report, CanonicalizeReport, EndpointRejection};
pub use errors::SearchError;
pub use interfaces::SearchProvider;
pub use opensearch::OpenSearchProvider;
pub use service::{EnsureIndexOutcome, SearchService};
pub use types::{
    FetchedDocument, IndexedDocument, PingInfo, ServerInfo, VersionInfo, LEGACY_MAPPING_TYPE,
};
