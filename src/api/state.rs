//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::ApiConfig;
use crate::dashboard::DashboardAggregator;
use crate::registry::RegistryClient;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dashboard aggregator for building the merged view-model
    pub aggregator: Arc<DashboardAggregator>,
    /// Land registry client (optional; land routes 503 without it)
    pub registry: Option<Arc<RegistryClient>>,
    /// Base URL of the upstream stats backend, for health reporting
    pub upstream_url: String,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState without the land registry
    pub fn new(
        aggregator: Arc<DashboardAggregator>,
        upstream_url: impl Into<String>,
        config: ApiConfig,
    ) -> Self {
        Self {
            aggregator,
            registry: None,
            upstream_url: upstream_url.into(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with a connected land registry client
    pub fn with_registry(
        aggregator: Arc<DashboardAggregator>,
        registry: Arc<RegistryClient>,
        upstream_url: impl Into<String>,
        config: ApiConfig,
    ) -> Self {
        Self {
            aggregator,
            registry: Some(registry),
            upstream_url: upstream_url.into(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if the land registry is available
    pub fn has_registry(&self) -> bool {
        self.registry.is_some()
    }
}
