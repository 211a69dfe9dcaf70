//! Liveness handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// GET / - static liveness text.
pub async fn home() -> &'static str {
    "Sobriety bot is running"
}

/// GET /health - Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.uptime_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::handlers::test_support::{make_test_state, RecordingSender};

    #[tokio::test]
    async fn test_health_handler() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let state = make_test_state(None, today, Arc::new(RecordingSender::default()));
        let response = health(State(state)).await;

        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_home_handler() {
        assert_eq!(home().await, "Sobriety bot is running");
    }
}
