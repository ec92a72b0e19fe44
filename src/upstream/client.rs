//! Stats Endpoints Client
//!
//! Authorized HTTP client for the backend stats endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::dashboard::{ApplicationStats, StatsSource, UserStats};

const USERS_PATH: &str = "/api/auth/users?limit=1";
const VEHICLES_PATH: &str = "/api/vehicles/stats";
const LICENSES_PATH: &str = "/api/licenses/stats";
const LAND_PATH: &str = "/api/land/admin?limit=1";

/// Client for the four upstream stats endpoints
pub struct StatsClient {
    client: Client,
    config: UpstreamConfig,
}

impl StatsClient {
    /// Create a new stats client with the given configuration
    pub fn new(config: UpstreamConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Issue one authorized GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(classify)
    }
}

/// Map transport-level failures onto the error taxonomy
fn classify(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else if e.is_connect() {
        UpstreamError::Unavailable
    } else {
        UpstreamError::Request(e)
    }
}

/// Users endpoint body: counts at the top level, no envelope
#[derive(Debug, Deserialize)]
struct UserCountsBody {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    admins: u64,
}

/// Application endpoints body: counts under an optional `stats` key
#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(default)]
    stats: ApplicationStats,
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn user_stats(&self) -> Result<UserStats, UpstreamError> {
        let body: UserCountsBody = self.get_json(USERS_PATH).await?;
        // The endpoint reports no distinct active count; active mirrors total.
        Ok(UserStats {
            total: body.total,
            active: body.total,
            admins: body.admins,
        })
    }

    async fn vehicle_stats(&self) -> Result<ApplicationStats, UpstreamError> {
        let body: StatsEnvelope = self.get_json(VEHICLES_PATH).await?;
        Ok(body.stats)
    }

    async fn license_stats(&self) -> Result<ApplicationStats, UpstreamError> {
        let body: StatsEnvelope = self.get_json(LICENSES_PATH).await?;
        Ok(body.stats)
    }

    async fn land_stats(&self) -> Result<ApplicationStats, UpstreamError> {
        let body: StatsEnvelope = self.get_json(LAND_PATH).await?;
        Ok(body.stats)
    }
}

/// Errors that can occur when fetching upstream stats
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream unavailable")]
    Unavailable,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[test]
    fn stats_envelope_defaults_when_absent() {
        let body: StatsEnvelope = serde_json::from_str(r#"{"records": []}"#).unwrap();
        assert_eq!(body.stats, ApplicationStats::default());

        let body: StatsEnvelope = serde_json::from_str(
            r#"{"stats": {"total": 7, "pending": 2, "approved": 4, "rejected": 1}}"#,
        )
        .unwrap();
        assert_eq!(body.stats.total, 7);
        assert_eq!(body.stats.rejected, 1);
    }

    #[test]
    fn user_counts_body_tolerates_missing_fields() {
        let body: UserCountsBody = serde_json::from_str(r#"{"total": 42}"#).unwrap();
        assert_eq!(body.total, 42);
        assert_eq!(body.admins, 0);
    }

    async fn spawn_fixture_server() -> String {
        let app = Router::new()
            .route(
                "/api/auth/users",
                get(|| async { Json(json!({"total": 12, "admins": 2})) }),
            )
            .route(
                "/api/vehicles/stats",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/api/licenses/stats",
                get(|| async { Json(json!({"stats": {"total": 3, "approved": 3}})) }),
            )
            .route(
                "/api/land/admin",
                get(|| async { Json(json!({"records": []})) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn fetches_and_maps_each_endpoint() {
        let base_url = spawn_fixture_server().await;
        let client = StatsClient::new(UpstreamConfig {
            base_url,
            ..Default::default()
        });

        let users = client.user_stats().await.unwrap();
        assert_eq!(users.total, 12);
        assert_eq!(users.active, 12);
        assert_eq!(users.admins, 2);

        let licenses = client.license_stats().await.unwrap();
        assert_eq!(licenses.total, 3);
        assert_eq!(licenses.approved, 3);

        // Body without a stats envelope decodes to a zeroed group
        let land = client.land_stats().await.unwrap();
        assert_eq!(land, ApplicationStats::default());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base_url = spawn_fixture_server().await;
        let client = StatsClient::new(UpstreamConfig {
            base_url,
            ..Default::default()
        });

        let err = client.vehicle_stats().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_unavailable() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = StatsClient::new(UpstreamConfig {
            base_url: format!("http://{}", addr),
            ..Default::default()
        });

        let err = client.user_stats().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable));
    }
}
