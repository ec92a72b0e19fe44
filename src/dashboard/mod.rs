//! Admin Dashboard Core
//!
//! The dashboard is built from four independent upstream resources (users,
//! vehicles, licenses, land). Aggregation fans the fetches out concurrently,
//! waits for all of them to settle, and degrades gracefully: a failed group
//! shows its configured fallback values instead of an error state.
//!
//! ## Pieces
//!
//! - **stats**: view-model types, pure merge functions, fallback values
//! - **aggregator**: concurrent fetch + join with fallback substitution
//! - **activity**: display-only recent-activity feed

mod activity;
mod aggregator;
mod stats;

pub use activity::{sample_feed, ActivityEntry, ActivityStatus};
pub use aggregator::{DashboardAggregator, StatsSource};
pub use stats::{
    ApplicationStats, DashboardStats, FallbackStats, GroupUpdate, Resource, UserStats,
};
