//! Dependency initialization and wiring for the demo.

use tracing::info;

use crate::config::DemoConfig;
use crate::demo::Demo;
use crate::AppError;
use search_demo_repository::{OpenSearchProvider, SearchService};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured demo ready to run.
    pub demo: Demo,
}

impl Dependencies {
    /// Connect to the search server and build the demo.
    ///
    /// Endpoints are canonicalized first; the provider then binds to the
    /// first one that answers a ping.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If no endpoint is usable or reachable
    pub async fn new(config: &DemoConfig) -> Result<Self, AppError> {
        let provider_config = config.provider_config()?;

        info!(
            endpoints = ?provider_config.endpoints,
            timeout_secs = provider_config.request_timeout.as_secs(),
            index = %config.index.name,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(provider_config)
            .await
            .map_err(|e| AppError::config(format!("Failed to connect to search server: {}", e)))?;

        info!(url = %provider.endpoint(), "Search server connection established");

        let service = SearchService::new(Box::new(provider));
        let demo = Demo::new(service, config.index.clone(), config.doc_type.clone());

        Ok(Self { demo })
    }
}
