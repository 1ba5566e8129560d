//! Demo settings read from environment variables.

use std::env;
use std::time::Duration;
use tracing::warn;

use crate::AppError;
use search_demo_repository::config::DEFAULT_REQUEST_TIMEOUT;
use search_demo_repository::opensearch::{IndexConfig, DEFAULT_INDEX_NAME};
use search_demo_repository::{canonicalize_with_report, BasicAuth, ProviderConfig};

/// Default search server endpoint.
const DEFAULT_ENDPOINTS: &str = "http://58.222.20.252:9200";

/// Default document type label.
const DEFAULT_DOC_TYPE: &str = "tweet";

/// Settings for a demo run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Endpoints as supplied, before canonicalization.
    pub raw_endpoints: Vec<String>,
    pub basic_auth: Option<BasicAuth>,
    pub request_timeout: Duration,
    pub index: IndexConfig,
    /// Type label printed next to indexed documents.
    pub doc_type: String,
}

impl DemoConfig {
    /// Read the settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTICSEARCH_URLS`: Comma-separated endpoints (default: http://58.222.20.252:9200)
    /// - `ELASTICSEARCH_USERNAME`: Basic auth username (optional)
    /// - `ELASTICSEARCH_PASSWORD`: Basic auth password (requires a username)
    /// - `ELASTICSEARCH_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `DEMO_INDEX`: Index name (default: twitter)
    /// - `DEMO_TYPE`: Document type label (default: tweet)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_endpoints = lookup("ELASTICSEARCH_URLS")
            .unwrap_or_else(|| DEFAULT_ENDPOINTS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let basic_auth = match (
            lookup("ELASTICSEARCH_USERNAME"),
            lookup("ELASTICSEARCH_PASSWORD"),
        ) {
            (Some(username), password) => {
                Some(BasicAuth::new(username, password.unwrap_or_default()))
            }
            (None, Some(_)) => {
                return Err(AppError::config(
                    "ELASTICSEARCH_PASSWORD is set but ELASTICSEARCH_USERNAME is not",
                ))
            }
            (None, None) => None,
        };

        let request_timeout = match lookup("ELASTICSEARCH_TIMEOUT_SECS") {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        value = %value,
                        default_secs = DEFAULT_REQUEST_TIMEOUT.as_secs(),
                        "Invalid ELASTICSEARCH_TIMEOUT_SECS, using default"
                    );
                    DEFAULT_REQUEST_TIMEOUT
                }
            },
        };

        let index = IndexConfig::new(
            lookup("DEMO_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
        );
        let doc_type = lookup("DEMO_TYPE").unwrap_or_else(|| DEFAULT_DOC_TYPE.to_string());

        Ok(Self {
            raw_endpoints,
            basic_auth,
            request_timeout,
            index,
            doc_type,
        })
    }

    /// Canonicalize the raw endpoints into a provider configuration.
    ///
    /// Rejected endpoints are logged and skipped. It is an error for none to
    /// remain.
    pub fn provider_config(&self) -> Result<ProviderConfig, AppError> {
        let report = canonicalize_with_report(&self.raw_endpoints);

        for rejected in &report.rejected {
            warn!(
                endpoint = %rejected.input,
                reason = %rejected.reason,
                "Ignoring unusable search endpoint"
            );
        }

        if report.endpoints.is_empty() {
            return Err(AppError::config(format!(
                "no usable http or https endpoint in {:?}",
                self.raw_endpoints
            )));
        }

        let mut config = ProviderConfig::new(report.endpoints)
            .with_request_timeout(self.request_timeout);
        if let Some(auth) = &self.basic_auth {
            config = config.with_basic_auth(auth.clone());
        }

        Ok(config)
    }
}
