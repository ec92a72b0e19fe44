//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::dashboard::{ActivityEntry, DashboardStats};

// ============================================
// DASHBOARD DTOs
// ============================================

/// Full dashboard payload: merged stats plus the activity feed
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEntry>,
    /// When this view-model was built (ms since epoch)
    pub generated_at: i64,
}

/// Recent-activity list
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub entries: Vec<ActivityEntry>,
}

// ============================================
// LAND REGISTRY DTOs
// ============================================

/// Land registration request
#[derive(Debug, Deserialize)]
pub struct RegisterLandRequest {
    /// Record id on the ledger
    pub id: u64,
    /// Owner account address (hex)
    pub owner: String,
    /// Postal address of the property
    pub property_address: String,
}

/// Land registration response
#[derive(Debug, Serialize)]
pub struct RegisterLandResponse {
    /// Status: "confirmed"
    pub status: String,
    /// Hash of the inclusion transaction
    pub tx_hash: String,
    /// Block the transaction landed in, when reported
    pub block_number: Option<u64>,
}

/// Land record lookup response
#[derive(Debug, Serialize)]
pub struct LandDetailsResponse {
    pub id: u64,
    /// Owner account address (hex)
    pub owner: String,
    pub property_address: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Upstream stats backend this instance aggregates from
    pub upstream: String,
    /// "ok" when the land registry client is connected, "disabled" otherwise
    pub registry: String,
    pub uptime_seconds: u64,
    pub version: String,
}
