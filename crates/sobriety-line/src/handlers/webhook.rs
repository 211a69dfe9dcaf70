//! LINE webhook handler.

use axum::{body::Bytes, extract::State, http::HeaderMap};
use tracing::{debug, info, warn};

use crate::error::WebhookError;
use crate::event::WebhookPayload;
use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::state::AppState;

/// POST /callback - verify the signature, answer each text message.
///
/// Events are handled one after another; a failed reply is logged and the
/// next event still runs. The call succeeds once the signature and payload
/// are valid, regardless of reply delivery.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookError> {
    let secret = state
        .config
        .channel_secret
        .as_deref()
        .ok_or(WebhookError::MissingChannelSecret)?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    verify_signature(secret, &body, signature).inspect_err(|_| {
        warn!(bytes = body.len(), "Rejected webhook with bad signature");
    })?;

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

    let messages = payload.text_messages();
    debug!(
        events = payload.events.len(),
        text_messages = messages.len(),
        "Webhook received"
    );

    for inbound in messages {
        let reply = state.tracker.handle_text(&inbound.text).await;
        match state.sender.reply(&inbound.reply_token, &reply).await {
            Ok(()) => info!(text = %inbound.text, "Reply sent"),
            Err(e) => warn!(error = %e, "Failed to send reply"),
        }
    }

    Ok("OK")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{HeaderValue, StatusCode};
    use axum::response::IntoResponse;
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::handlers::test_support::{make_test_state, RecordingSender, SECRET};
    use crate::signature::sign;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    fn text_event(token: &str, text: &str) -> serde_json::Value {
        json!({
            "type": "message",
            "replyToken": token,
            "message": { "id": "1", "type": "text", "text": text }
        })
    }

    fn signed_headers(body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&sign(SECRET, body).unwrap()).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_callback_replies_in_order() {
        let sender = Arc::new(RecordingSender::default());
        let state = make_test_state(Some(SECRET), today(), Arc::clone(&sender));
        let body = json!({
            "events": [
                text_event("r1", "禁酒開始 20250901"),
                text_event("r2", "何日目？")
            ]
        })
        .to_string();

        let result = callback(
            State(state.clone()),
            signed_headers(body.as_bytes()),
            Bytes::from(body),
        )
        .await;

        assert_eq!(result.unwrap(), "OK");
        let replies = sender.replies.lock().unwrap().clone();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].0, "r1");
        assert_eq!(
            replies[0].1,
            "開始日 2025-09-01 を保存しました。今日は禁酒10日目です！"
        );
        assert_eq!(replies[1].0, "r2");
        assert_eq!(replies[1].1, "今日は禁酒10日目です！（開始日: 2025-09-01）");
    }

    #[tokio::test]
    async fn test_callback_without_secret_is_500() {
        let state = make_test_state(None, today(), Arc::new(RecordingSender::default()));
        let body = json!({ "events": [] }).to_string();

        let err = callback(State(state), signed_headers(body.as_bytes()), Bytes::from(body))
            .await
            .unwrap_err();

        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_callback_reply_failure_still_ok() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let state = make_test_state(Some(SECRET), today(), Arc::clone(&sender));
        let body = json!({
            "events": [text_event("r1", "禁酒開始 20250901"), text_event("r2", "?")]
        })
        .to_string();

        let result = callback(
            State(state.clone()),
            signed_headers(body.as_bytes()),
            Bytes::from(body),
        )
        .await;

        assert!(result.is_ok());
        // Both events were attempted and the start date was still saved.
        assert_eq!(sender.replies.lock().unwrap().len(), 2);
        assert_eq!(
            state.tracker.current_start().await,
            NaiveDate::from_ymd_opt(2025, 9, 1)
        );
    }

    #[tokio::test]
    async fn test_callback_malformed_json_is_400() {
        let state = make_test_state(Some(SECRET), today(), Arc::new(RecordingSender::default()));
        let body = b"{not json".to_vec();

        let err = callback(State(state), signed_headers(&body), Bytes::from(body))
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::MalformedPayload(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
