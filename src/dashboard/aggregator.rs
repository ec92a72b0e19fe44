//! Dashboard Aggregation
//!
//! Fans the four resource fetches out as independent tasks, converts each
//! failure into that resource's fallback value before the join, and merges
//! the settled results into a single [`DashboardStats`]. The join itself is
//! failure-free; if the aggregation stage still fails unexpectedly (a worker
//! panic), the whole view-model resets to the fallback set.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};

use crate::dashboard::stats::{
    ApplicationStats, DashboardStats, FallbackStats, GroupUpdate, Resource, UserStats,
};
use crate::upstream::UpstreamError;

/// Read side of the four upstream stat groups.
///
/// The production implementation is [`crate::upstream::StatsClient`]; tests
/// substitute stubs.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn user_stats(&self) -> Result<UserStats, UpstreamError>;
    async fn vehicle_stats(&self) -> Result<ApplicationStats, UpstreamError>;
    async fn license_stats(&self) -> Result<ApplicationStats, UpstreamError>;
    async fn land_stats(&self) -> Result<ApplicationStats, UpstreamError>;
}

/// One-shot builder of the merged dashboard view-model
pub struct DashboardAggregator {
    source: Arc<dyn StatsSource>,
    fallback: FallbackStats,
}

impl DashboardAggregator {
    pub fn new(source: Arc<dyn StatsSource>, fallback: FallbackStats) -> Self {
        Self { source, fallback }
    }

    /// Refresh the dashboard view-model.
    ///
    /// Always yields a complete set: groups whose fetch failed carry their
    /// configured fallback values, and an unexpected aggregation failure
    /// resets the whole view-model to the fallback set.
    pub async fn refresh(&self) -> DashboardStats {
        match self.try_refresh().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!("dashboard aggregation failed: {}; serving fallback set", e);
                self.fallback.complete()
            }
        }
    }

    /// Dispatch all four fetches, wait for every one to settle, merge.
    ///
    /// Each task folds its own failure into the fallback value, so the only
    /// error that can reach the join is a worker panic.
    async fn try_refresh(&self) -> Result<DashboardStats, JoinError> {
        let handles = Resource::ALL.map(|resource| self.spawn_fetch(resource));

        let mut stats = DashboardStats::default();
        for handle in handles {
            stats = stats.apply(handle.await?);
        }
        Ok(stats)
    }

    fn spawn_fetch(&self, resource: Resource) -> JoinHandle<GroupUpdate> {
        let source = Arc::clone(&self.source);
        let fallback = self.fallback.update_for(resource);

        tokio::spawn(async move {
            let fetched = match resource {
                Resource::Users => source.user_stats().await.map(GroupUpdate::Users),
                Resource::Vehicles => source.vehicle_stats().await.map(GroupUpdate::Vehicles),
                Resource::Licenses => source.license_stats().await.map(GroupUpdate::Licenses),
                Resource::Land => source.land_stats().await.map(GroupUpdate::Land),
            };

            match fetched {
                Ok(update) => update,
                Err(e) => {
                    tracing::warn!(
                        resource = resource.name(),
                        error = %e,
                        "stats fetch failed, substituting fallback"
                    );
                    fallback
                }
            }
        })
    }
}
