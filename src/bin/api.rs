//! MoT Portal API Server
//!
//! Run with: cargo run --bin motportal-api
//!
//! # Configuration
//!
//! Reads config.toml from the standard locations, with `MOTPORTAL_*`
//! environment variable overrides:
//! - `MOTPORTAL_UPSTREAM_URL`: Stats backend base URL
//! - `MOTPORTAL_AUTH_TOKEN`: Bearer credential for the stats endpoints
//! - `MOTPORTAL_API_HOST` / `MOTPORTAL_API_PORT`: Bind address
//! - `MOTPORTAL_REGISTRY_RPC_URL` / `MOTPORTAL_REGISTRY_ADDRESS`: Ledger node and contract
//! - `MOTPORTAL_SIGNER_KEY`: Portal signing key (enables land routes)
//! - `RUST_LOG`: Log filter (default: from `logging.level`)

use motportal::api::{serve, AppState};
use motportal::config::{Config, LoggingConfig};
use motportal::dashboard::DashboardAggregator;
use motportal::registry::{RegistryClient, RegistryError};
use motportal::upstream::StatsClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting MoT Portal API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Upstream stats backend: {}", config.upstream.base_url);

    let source = Arc::new(StatsClient::new(config.upstream.clone()));
    let aggregator = Arc::new(DashboardAggregator::new(source, config.fallback));

    // Create app state (with or without the land registry)
    let state = if config.registry.enabled {
        match RegistryClient::connect(&config.registry).await {
            Ok(client) => {
                tracing::info!("Land registry enabled: {}", config.registry.rpc_url);
                AppState::with_registry(
                    aggregator,
                    Arc::new(client),
                    config.upstream.base_url.clone(),
                    config.api.clone(),
                )
            }
            Err(e @ RegistryError::WalletUnavailable) => {
                tracing::error!("{}; land routes disabled", e);
                AppState::new(aggregator, config.upstream.base_url.clone(), config.api.clone())
            }
            Err(e) => {
                tracing::error!("Failed to connect land registry: {}; land routes disabled", e);
                AppState::new(aggregator, config.upstream.base_url.clone(), config.api.clone())
            }
        }
    } else {
        tracing::info!("Land registry disabled (set registry.enabled to enable)");
        AppState::new(aggregator, config.upstream.base_url.clone(), config.api.clone())
    };

    // Run server
    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("MoT Portal API server stopped");
    Ok(())
}

/// Initialize tracing from the logging configuration.
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "motportal={},tower_http=debug",
            logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
