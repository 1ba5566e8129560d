//! # Search Demo Shared
//!
//! This crate defines the document types indexed by the search demo.
//! They are plain serde structs so any search backend can store them as JSON.

pub mod types;

pub use types::tweet::{SuggestField, Tweet};
