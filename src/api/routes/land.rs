//! Land Registry Routes
//!
//! Contract-backed land record operations.
//!
//! - POST /api/v1/land - Register a record on the ledger
//! - GET /api/v1/land/:id - Fetch a record by id

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ethers::core::types::Address;
use std::sync::Arc;

use crate::api::dto::{LandDetailsResponse, RegisterLandRequest, RegisterLandResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::registry::RegistryClient;

fn registry(state: &AppState) -> ApiResult<&Arc<RegistryClient>> {
    state.registry.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("land registry is not configured on this instance".to_string())
    })
}

/// POST /api/v1/land
///
/// Submits the registration transaction and waits for the inclusion
/// receipt. The outcome is whatever the ledger reports.
pub async fn register_land(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterLandRequest>,
) -> ApiResult<(StatusCode, Json<RegisterLandResponse>)> {
    let owner = request
        .owner
        .parse::<Address>()
        .map_err(|e| ApiError::Validation(format!("invalid owner address: {}", e)))?;
    if request.property_address.trim().is_empty() {
        return Err(ApiError::Validation("property_address is required".to_string()));
    }

    let registry = registry(&state)?;
    let outcome = registry
        .register_land(request.id, owner, &request.property_address)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterLandResponse {
            status: "confirmed".to_string(),
            tx_hash: outcome.tx_hash,
            block_number: outcome.block_number,
        }),
    ))
}

/// GET /api/v1/land/:id
pub async fn get_land(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<LandDetailsResponse>> {
    let registry = registry(&state)?;

    let record = registry
        .get_land_details(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("land record {}", id)))?;

    Ok(Json(LandDetailsResponse {
        id: record.id,
        owner: format!("{:?}", record.owner),
        property_address: record.property_address,
    }))
}
