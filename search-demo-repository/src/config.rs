//! Configuration types for the search provider.

use std::time::Duration;

/// Default request timeout for calls against the search server.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Basic authentication credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for a search provider.
///
/// Endpoints are expected to be canonical (see [`crate::endpoints`]). The
/// provider connects to the first endpoint that answers a ping, in order.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Canonical endpoint URLs, in order of preference.
    pub endpoints: Vec<String>,
    /// Explicit credentials. When `None`, userinfo embedded in the endpoint
    /// URL is used instead.
    pub basic_auth: Option<BasicAuth>,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoints: vec!["http://localhost:9200".to_string()],
            basic_auth: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Create a config for the given canonical endpoints.
    ///
    /// # Arguments
    ///
    /// * `endpoints` - Canonical endpoint URLs, in order of preference
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            ..Self::default()
        }
    }

    /// Use explicit basic authentication credentials.
    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
