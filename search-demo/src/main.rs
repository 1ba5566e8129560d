//! Search Demo Main Entry Point
//!
//! Connects to an Elasticsearch-compatible server, creates the demo index if
//! needed, indexes two tweets, reads one back and flushes the index.

use dotenv::dotenv;
use search_demo::{AppError, DemoConfig, Dependencies};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// Logs go to stderr so stdout only carries the demo output.
fn init_tracing() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_demo=info,search_demo_repository=info"));

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| AppError::config(format!("Failed to initialize tracing: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| AppError::config(format!("Failed to initialize tracing: {}", e)))?;
    }

    info!(
        service_name = "search-demo",
        service_version = env!("CARGO_PKG_VERSION"),
        json = json_output,
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    let config = DemoConfig::from_env()?;

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.demo.run().await {
        Ok(report) => {
            info!(
                version = %report.version,
                documents_indexed = report.indexed.len(),
                found = report.fetched.found,
                "Search demo completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Search demo failed");
            Err(e.into())
        }
    }
}
