//! Document types stored in the demo index.

pub mod tweet;

pub use tweet::{SuggestField, Tweet};
