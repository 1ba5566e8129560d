//! Tweet document type for the demo index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completion suggester input attached to a tweet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestField {
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

/// A tweet as it is stored in the search engine.
///
/// `user`, `message` and `retweets` are always serialized. Every other field
/// is omitted from the JSON body when it is empty, so documents indexed from
/// a partial raw JSON string deserialize back into this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Tweet {
    pub user: String,
    pub message: String,
    #[serde(default)]
    pub retweets: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        rename = "suggest_field",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub suggest: Option<SuggestField>,
}

impl Tweet {
    /// Create a tweet with only the required fields set.
    ///
    /// # Example
    ///
    /// ```
    /// use search_demo_shared::Tweet;
    ///
    /// let tweet = Tweet::new("olivere", "Take Five", 0);
    /// assert_eq!(tweet.user, "olivere");
    /// assert!(tweet.tags.is_empty());
    /// ```
    pub fn new(user: impl Into<String>, message: impl Into<String>, retweets: i64) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            retweets,
            ..Default::default()
        }
    }

    /// Set the creation timestamp.
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Replace the tag list.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
