//! Router configuration and server setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Creates the gateway router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        // LINE webhook
        .route("/callback", post(handlers::callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the webhook server and runs until Ctrl+C.
pub async fn serve(state: AppState) -> Result<(), std::io::Error> {
    let addr = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Webhook server listening on {}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down webhook server");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::handlers::test_support::{make_test_state, RecordingSender, SECRET};
    use crate::signature::{sign, SIGNATURE_HEADER};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    fn signature_header() -> HeaderName {
        HeaderName::from_static(SIGNATURE_HEADER)
    }

    fn signature_value(secret: &str, body: &[u8]) -> HeaderValue {
        HeaderValue::from_str(&sign(secret, body).unwrap()).unwrap()
    }

    fn server_with(secret: Option<&str>) -> (TestServer, Arc<RecordingSender>) {
        let sender = Arc::new(RecordingSender::default());
        let state = make_test_state(secret, today(), Arc::clone(&sender));
        (TestServer::new(create_router(state)).unwrap(), sender)
    }

    #[tokio::test]
    async fn test_home_endpoint() {
        let (server, _) = server_with(None);
        let response = server.get("/").await;
        response.assert_status_ok();
        response.assert_text("Sobriety bot is running");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _) = server_with(None);

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(!body["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_callback_signed_request() {
        let (server, sender) = server_with(Some(SECRET));
        let body = json!({
            "destination": "U1",
            "events": [{
                "type": "message",
                "replyToken": "r1",
                "message": { "id": "1", "type": "text", "text": "禁酒開始 20250910" }
            }]
        })
        .to_string();

        let response = server
            .post("/callback")
            .add_header(signature_header(), signature_value(SECRET, body.as_bytes()))
            .text(body)
            .await;

        response.assert_status_ok();
        response.assert_text("OK");
        let replies = sender.replies.lock().unwrap().clone();
        assert_eq!(
            replies,
            vec![(
                "r1".to_string(),
                "開始日 2025-09-10 を保存しました。今日は禁酒1日目です！".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_callback_bad_signature() {
        let (server, sender) = server_with(Some(SECRET));
        let body = json!({ "events": [] }).to_string();

        let response = server
            .post("/callback")
            .add_header(signature_header(), signature_value("wrong-secret", body.as_bytes()))
            .text(body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "invalid signature");
        assert!(sender.replies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_callback_missing_signature() {
        let (server, _) = server_with(Some(SECRET));

        let response = server.post("/callback").text("{\"events\":[]}").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_callback_missing_secret() {
        let (server, _) = server_with(None);
        let body = "{\"events\":[]}";

        let response = server
            .post("/callback")
            .add_header(signature_header(), signature_value(SECRET, body.as_bytes()))
            .text(body)
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_callback_get_not_allowed() {
        let (server, _) = server_with(Some(SECRET));
        let response = server.get("/callback").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
