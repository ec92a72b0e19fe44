//! Dashboard Routes
//!
//! The merged admin dashboard view-model and the recent-activity feed.
//!
//! - GET /api/v1/dashboard - Stats plus recent activity
//! - GET /api/v1/dashboard/stats - Stats only
//! - GET /api/v1/activity - Recent activity only

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ActivityResponse, DashboardResponse};
use crate::api::state::AppState;
use crate::dashboard::{sample_feed, DashboardStats};

/// GET /api/v1/dashboard
///
/// Refreshes the view-model and returns it with the activity feed.
/// Aggregation never fails outward: failed groups carry their fallback
/// values, so this handler is infallible.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let stats = state.aggregator.refresh().await;

    Json(DashboardResponse {
        stats,
        recent_activity: sample_feed(),
        generated_at: chrono::Utc::now().timestamp_millis(),
    })
}

/// GET /api/v1/dashboard/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<DashboardStats> {
    Json(state.aggregator.refresh().await)
}

/// GET /api/v1/activity
pub async fn get_activity() -> Json<ActivityResponse> {
    Json(ActivityResponse {
        entries: sample_feed(),
    })
}
