//! MoT Portal REST API
//!
//! HTTP API layer for the portal, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Merged stats plus recent activity
//! - `GET /api/v1/dashboard/stats` - Merged stats only
//! - `GET /api/v1/activity` - Recent activity feed
//!
//! ## Land Registry
//! - `POST /api/v1/land` - Register a land record on the ledger
//! - `GET /api/v1/land/:id` - Fetch a land record by id
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use motportal::api::{serve, AppState};
//! use motportal::config::Config;
//! use motportal::dashboard::DashboardAggregator;
//! use motportal::upstream::StatsClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let source = Arc::new(StatsClient::new(config.upstream.clone()));
//!     let aggregator = Arc::new(DashboardAggregator::new(source, config.fallback));
//!
//!     let state = AppState::new(aggregator, config.upstream.base_url, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/dashboard/stats", get(routes::dashboard::get_stats))
        .route("/activity", get(routes::dashboard::get_activity))
        // Land registry routes
        .route("/land", post(routes::land::register_land))
        .route("/land/:id", get(routes::land::get_land));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy from the configured origins; permissive when none are set
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("MoT Portal API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("MoT Portal API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{
        ApplicationStats, DashboardAggregator, FallbackStats, StatsSource, UserStats,
    };
    use crate::upstream::UpstreamError;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    /// Every fetch fails; the dashboard should serve fallbacks
    struct DownSource;

    #[async_trait]
    impl StatsSource for DownSource {
        async fn user_stats(&self) -> Result<UserStats, UpstreamError> {
            Err(UpstreamError::Unavailable)
        }

        async fn vehicle_stats(&self) -> Result<ApplicationStats, UpstreamError> {
            Err(UpstreamError::Unavailable)
        }

        async fn license_stats(&self) -> Result<ApplicationStats, UpstreamError> {
            Err(UpstreamError::Unavailable)
        }

        async fn land_stats(&self) -> Result<ApplicationStats, UpstreamError> {
            Err(UpstreamError::Unavailable)
        }
    }

    fn create_test_app() -> Router {
        let aggregator = Arc::new(DashboardAggregator::new(
            Arc::new(DownSource),
            FallbackStats::default(),
        ));
        let state = AppState::new(aggregator, "http://localhost:5000", ApiConfig::default());
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full_reports_registry_disabled() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["registry"], "disabled");
        assert_eq!(body["upstream"], "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_dashboard_serves_fallbacks_when_upstream_is_down() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["stats"]["users"]["total"], 245);
        assert_eq!(body["stats"]["vehicles"]["pending"], 23);
        assert_eq!(body["stats"]["licenses"]["approved"], 287);
        assert_eq!(body["stats"]["land"]["rejected"], 5);
        assert_eq!(body["recent_activity"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_activity_feed() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/activity")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["status"], "pending");
        assert_eq!(entries[4]["status"], "under-review");
    }

    #[tokio::test]
    async fn test_register_land_without_registry_is_unavailable() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/land")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"id": 1, "owner": "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1", "property_address": "123 Main St"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_register_land_rejects_bad_owner_address() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/land")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"id": 1, "owner": "not-an-address", "property_address": "123 Main St"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_land_without_registry_is_unavailable() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/land/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
