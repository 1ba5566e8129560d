//! Index configuration and mappings for the demo index.
//!
//! This module defines the settings and tweet mapping used when the demo
//! creates its index.

use serde_json::{json, Value};

/// The default name of the demo index.
pub const DEFAULT_INDEX_NAME: &str = "twitter";

/// Configuration for the demo index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub name: String,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

impl IndexConfig {
    /// Create an index configuration with one shard and no replicas.
    ///
    /// # Arguments
    ///
    /// * `name` - The index name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number_of_shards: 1,
            number_of_replicas: 0,
        }
    }
}

/// Get the index settings and mappings for the tweet index.
///
/// The configuration includes:
/// - **keyword** fields for `user`, `image` and `tags`
/// - **text** for `message`, with a `raw` keyword sub-field
/// - **completion** for `suggest_field`
///
/// With `mapping_type` set, the properties are nested under that type, which
/// Elasticsearch before 7.x requires. Otherwise the mappings are typeless.
///
/// # Arguments
///
/// * `config` - Shard and replica counts
/// * `mapping_type` - Type name for servers that still use mapping types
pub fn get_index_settings(config: &IndexConfig, mapping_type: Option<&str>) -> Value {
    let mapping = tweet_mapping();
    let mappings = match mapping_type {
        Some(mapping_type) => json!({ mapping_type: mapping }),
        None => mapping,
    };

    json!({
        "settings": {
            "number_of_shards": config.number_of_shards,
            "number_of_replicas": config.number_of_replicas
        },
        "mappings": mappings
    })
}

fn tweet_mapping() -> Value {
    json!({
        "properties": {
            "user": {
                "type": "keyword"
            },
            "message": {
                "type": "text",
                "store": true,
                "fields": {
                    "raw": {
                        "type": "keyword"
                    }
                }
            },
            "retweets": {
                "type": "long"
            },
            "image": {
                "type": "keyword"
            },
            "created": {
                "type": "date"
            },
            "tags": {
                "type": "keyword"
            },
            "location": {
                "type": "geo_point"
            },
            "suggest_field": {
                "type": "completion"
            }
        }
    })
}
