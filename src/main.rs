//! MoT Portal Dashboard
//!
//! One-shot dashboard refresh: fetches the four stat groups concurrently,
//! merges them, and logs the resulting cards plus the recent-activity feed.

use motportal::config::Config;
use motportal::dashboard::{sample_feed, DashboardAggregator};
use motportal::upstream::StatsClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "motportal=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("MoT Portal v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_default();
    tracing::info!("Upstream stats backend: {}", config.upstream.base_url);

    let source = Arc::new(StatsClient::new(config.upstream.clone()));
    let aggregator = DashboardAggregator::new(source, config.fallback);

    let stats = aggregator.refresh().await;

    tracing::info!(
        "Users: {} total, {} active, {} admins",
        stats.users.total,
        stats.users.active,
        stats.users.admins
    );
    tracing::info!(
        "Vehicle applications: {} total, {} pending, {} approved, {} rejected",
        stats.vehicles.total,
        stats.vehicles.pending,
        stats.vehicles.approved,
        stats.vehicles.rejected
    );
    tracing::info!(
        "License applications: {} total, {} pending, {} approved, {} rejected",
        stats.licenses.total,
        stats.licenses.pending,
        stats.licenses.approved,
        stats.licenses.rejected
    );
    tracing::info!(
        "Land applications: {} total, {} pending, {} approved, {} rejected",
        stats.land.total,
        stats.land.pending,
        stats.land.approved,
        stats.land.rejected
    );

    tracing::info!("Recent activity:");
    for entry in sample_feed() {
        tracing::info!(
            "[{}] {}: {} (by {}, {})",
            entry.status.as_str(),
            entry.kind,
            entry.description,
            entry.actor,
            entry.relative_time
        );
    }

    Ok(())
}
