//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchProvider`
//! using the OpenSearch Rust crate. The endpoints it speaks to are
//! Elasticsearch-compatible, so it works against either server.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesFlushParts},
    GetParts, IndexParts, OpenSearch,
};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{BasicAuth, ProviderConfig};
use crate::errors::SearchError;
use crate::interfaces::SearchProvider;
use crate::types::{CreateIndexResponse, FetchedDocument, IndexedDocument, PingInfo, ServerInfo};

/// OpenSearch provider implementation.
///
/// Holds one client bound to the first endpoint that answered a ping when the
/// provider was created.
///
/// # Example
///
/// ```ignore
/// use search_demo_repository::{canonicalize, OpenSearchProvider, ProviderConfig};
///
/// let endpoints = canonicalize(["http://localhost:9200/"]);
/// let provider = OpenSearchProvider::new(ProviderConfig::new(endpoints)).await?;
/// let version = provider.server_version().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    endpoint: Url,
}

impl OpenSearchProvider {
    /// Create a provider connected to the first reachable endpoint.
    ///
    /// Endpoints are tried in order. Each one gets a fresh client and a ping;
    /// the first that answers is kept.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - Bound to the first endpoint that answered
    /// * `Err(SearchError::NoEndpoints)` - If `config.endpoints` is empty
    /// * `Err(SearchError::ConnectionError)` - If no endpoint answered
    pub async fn new(config: ProviderConfig) -> Result<Self, SearchError> {
        if config.endpoints.is_empty() {
            return Err(SearchError::no_endpoints(
                "at least one http or https endpoint is required",
            ));
        }

        let mut failures = Vec::with_capacity(config.endpoints.len());

        for endpoint in &config.endpoints {
            let provider = match Self::build(endpoint, &config) {
                Ok(provider) => provider,
                Err(e) => {
                    warn!(error = %e, "Skipping endpoint that could not be configured");
                    failures.push(e.to_string());
                    continue;
                }
            };

            match provider.ping().await {
                Ok(ping) => {
                    info!(
                        url = %provider.endpoint,
                        status = ping.status_code,
                        version = %ping.version(),
                        cluster = %ping.info.cluster_name,
                        "Created OpenSearch provider"
                    );
                    return Ok(provider);
                }
                Err(e) => {
                    warn!(url = %provider.endpoint, error = %e, "Endpoint did not answer ping");
                    failures.push(format!("{}: {}", provider.endpoint, e));
                }
            }
        }

        Err(SearchError::connection(format!(
            "no search node available ({})",
            failures.join("; ")
        )))
    }

    /// The endpoint this provider is bound to, without credentials.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a client for a single endpoint without contacting it.
    fn build(endpoint: &str, config: &ProviderConfig) -> Result<Self, SearchError> {
        let (url, embedded_auth) = Self::split_credentials(endpoint)?;
        let auth = config.basic_auth.clone().or(embedded_auth);

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(config.request_timeout)
            .disable_proxy();
        if let Some(auth) = auth {
            builder = builder.auth(Credentials::Basic(auth.username, auth.password));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(Self {
            client: OpenSearch::new(transport),
            endpoint: url,
        })
    }

    /// Move userinfo out of an endpoint URL into basic auth credentials.
    ///
    /// Keeps credentials out of the URL the transport logs and joins paths
    /// onto. Userinfo is percent-decoded, since reserved characters in a
    /// password can only appear encoded in the URL.
    fn split_credentials(endpoint: &str) -> Result<(Url, Option<BasicAuth>), SearchError> {
        let mut url = Url::parse(endpoint)
            .map_err(|e| SearchError::validation(format!("Invalid endpoint: {}", e)))?;

        if url.username().is_empty() && url.password().is_none() {
            return Ok((url, None));
        }

        let username = Self::decode_userinfo(url.username())?;
        let password = Self::decode_userinfo(url.password().unwrap_or_default())?;
        let auth = BasicAuth::new(username, password);
        url.set_password(None)
            .and_then(|_| url.set_username(""))
            .map_err(|_| SearchError::validation("Endpoint cannot carry credentials"))?;

        Ok((url, Some(auth)))
    }

    fn decode_userinfo(encoded: &str) -> Result<String, SearchError> {
        percent_decode_str(encoded)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| SearchError::validation("Endpoint credentials are not valid UTF-8"))
    }

    /// Read a failed response into an error message, logging it.
    async fn failure(response: Response, operation: &str) -> String {
        let status = response.status_code();
        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "{} request failed", operation);
        format!("{} failed with status {}: {}", operation, status, error_body)
    }
}

#[async_trait]
impl SearchProvider for OpenSearchProvider {
    async fn ping(&self) -> Result<PingInfo, SearchError> {
        let response = self
            .client
            .info()
            .send()
            .await
            .map_err(|e| SearchError::ping(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchError::ping(Self::failure(response, "Ping").await));
        }

        let info = response
            .json::<ServerInfo>()
            .await
            .map_err(|e| SearchError::parse(format!("Invalid cluster info: {}", e)))?;

        Ok(PingInfo {
            status_code: status.as_u16(),
            info,
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index_exists(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(SearchError::index_exists(
                Self::failure(response, "Index exists").await,
            )),
        }
    }

    async fn create_index(&self, index: &str, body: Option<&Value>) -> Result<bool, SearchError> {
        let body = body.cloned().unwrap_or_else(|| json!({}));

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::index_creation(
                Self::failure(response, "Create index").await,
            ));
        }

        let created = response
            .json::<CreateIndexResponse>()
            .await
            .map_err(|e| SearchError::parse(format!("Invalid create index response: {}", e)))?;

        debug!(index = %index, acknowledged = created.acknowledged, "Index created");
        Ok(created.acknowledged)
    }

    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<IndexedDocument, SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .body(document.clone())
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::index(
                Self::failure(response, "Index document").await,
            ));
        }

        let indexed = response
            .json::<IndexedDocument>()
            .await
            .map_err(|e| SearchError::parse(format!("Invalid index response: {}", e)))?;

        debug!(index = %indexed.index, id = %indexed.id, result = %indexed.result, "Document indexed");
        Ok(indexed)
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<FetchedDocument, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::get(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the document may not exist
        if status.as_u16() == 404 {
            debug!(index = %index, id = %id, "Document not found");
            return Ok(FetchedDocument::not_found(index, id));
        }
        if !status.is_success() {
            return Err(SearchError::get(
                Self::failure(response, "Get document").await,
            ));
        }

        response
            .json::<FetchedDocument>()
            .await
            .map_err(|e| SearchError::parse(format!("Invalid get response: {}", e)))
    }

    async fn flush(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .flush(IndicesFlushParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::flush(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::flush(Self::failure(response, "Flush").await));
        }

        debug!(index = %index, "Index flushed");
        Ok(())
    }
}
