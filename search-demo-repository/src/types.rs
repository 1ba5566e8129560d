//! Response types for search operations.
//!
//! These mirror the JSON bodies returned by Elasticsearch-compatible servers.
//! Only the fields the demo reads are required; everything else is optional so
//! that both Elasticsearch and OpenSearch responses deserialize.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SearchError;

/// Single mapping type used on servers that still require one.
///
/// Matches the type the typeless `_doc` document endpoints write to.
pub const LEGACY_MAPPING_TYPE: &str = "_doc";

/// Version block of the cluster info response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    /// Server version number (e.g., "6.8.23" or "2.11.0").
    pub number: String,
    /// Distribution name; only present on OpenSearch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lucene_version: Option<String>,
}

/// Cluster info returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Node name.
    pub name: String,
    pub cluster_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_uuid: Option<String>,
    pub version: VersionInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

/// Result of a ping: the HTTP status code plus the cluster info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingInfo {
    /// HTTP status code of the ping response.
    pub status_code: u16,
    /// Parsed cluster info.
    pub info: ServerInfo,
}

impl PingInfo {
    /// Server version number.
    pub fn version(&self) -> &str {
        &self.info.version.number
    }

    /// Major component of the version number, if it parses.
    pub fn major_version(&self) -> Option<u64> {
        self.version().split('.').next()?.parse().ok()
    }

    /// Mapping type that create index bodies must nest properties under.
    ///
    /// Elasticsearch before 7.x reads the first key under `mappings` as a type
    /// name. OpenSearch and Elasticsearch 7.x+ take typeless mappings, as does
    /// any server whose version does not parse.
    pub fn mapping_type(&self) -> Option<&'static str> {
        if self.info.version.distribution.as_deref() == Some("opensearch") {
            return None;
        }
        match self.major_version() {
            Some(major) if major < 7 => Some(LEGACY_MAPPING_TYPE),
            _ => None,
        }
    }
}

/// Response to a create index request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateIndexResponse {
    /// Whether the master acknowledged the new index.
    pub acknowledged: bool,
    #[serde(default)]
    pub shards_acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

/// Response to an index document request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedDocument {
    #[serde(rename = "_index")]
    pub index: String,
    /// Mapping type; only reported by 6.x servers.
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: i64,
    /// "created" or "updated".
    #[serde(default)]
    pub result: String,
}

/// Response to a get document request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchedDocument {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    /// Absent when the document was not found.
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub found: bool,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl FetchedDocument {
    /// Build the response for a document that does not exist.
    pub fn not_found(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: None,
            id: id.into(),
            version: None,
            found: false,
            source: None,
        }
    }

    /// Deserialize `_source` into a typed document.
    ///
    /// Returns `Ok(None)` when the document was not found or has no source.
    pub fn source_as<T: DeserializeOwned>(&self) -> Result<Option<T>, SearchError> {
        match &self.source {
            Some(source) if self.found => serde_json::from_value(source.clone())
                .map(Some)
                .map_err(|e| SearchError::parse(format!("Invalid _source: {}", e))),
            _ => Ok(None),
        }
    }
}
