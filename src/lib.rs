//! # MoT Portal
//!
//! Service side of a Ministry of Transport administrative portal:
//! dashboard aggregation over four upstream resources, and a client for the
//! deployed land registry contract.
//!
//! ## Features
//!
//! - **Graceful degradation**: every dashboard group falls back to its
//!   configured placeholder values when its endpoint fails
//! - **Concurrent aggregation**: the four stat fetches run as independent
//!   tasks; one slow or failing resource never blocks the others
//! - **Ledger-backed land records**: register and look up records through
//!   the `LandRegistry` contract with a configured signing account
//! - **REST API**: Axum server exposing the merged view-model and the
//!   land operations
//!
//! ## Modules
//!
//! - [`dashboard`]: view-model, merge functions, aggregator, activity feed
//! - [`upstream`]: authorized HTTP client for the stats endpoints
//! - [`registry`]: land registry contract client
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use motportal::config::Config;
//! use motportal::dashboard::DashboardAggregator;
//! use motportal::upstream::StatsClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load_default();
//!
//!     let source = Arc::new(StatsClient::new(config.upstream.clone()));
//!     let aggregator = DashboardAggregator::new(source, config.fallback);
//!
//!     // Always yields a complete view-model, even with every upstream down
//!     let stats = aggregator.refresh().await;
//!     println!("{} registered users", stats.users.total);
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod registry;
pub mod upstream;

// Re-export top-level types for convenience
pub use dashboard::{
    sample_feed, ActivityEntry, ActivityStatus, ApplicationStats, DashboardAggregator,
    DashboardStats, FallbackStats, GroupUpdate, Resource, StatsSource, UserStats,
};

pub use api::{build_router, serve, ApiError, ApiResult, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, LoggingConfig, RegistryConfig, UpstreamConfig,
};

pub use registry::{LandRecord, RegistrationOutcome, RegistryClient, RegistryError};

pub use upstream::{StatsClient, UpstreamError};
