//! Interface definitions for the search provider.
//!
//! This module defines the abstract `SearchProvider` trait that allows
//! for dependency injection and swappable search backend implementations.

mod search_provider;

pub use search_provider::SearchProvider;
