//! Error types for the LINE gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors from the outbound LINE client.
#[derive(Debug, Error)]
pub enum LineError {
    /// Access token not configured.
    #[error("LINE channel access token not set. Set LINE_CHANNEL_ACCESS_TOKEN environment variable.")]
    NoToken,

    /// LINE answered with a non-success status.
    #[error("LINE API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for LineError {
    fn from(e: reqwest::Error) -> Self {
        LineError::HttpError(e.to_string())
    }
}

/// Result type for LINE client operations.
pub type Result<T> = std::result::Result<T, LineError>;

/// Errors that reject an inbound webhook call.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Channel secret not configured; signatures cannot be checked.
    #[error("channel secret not configured")]
    MissingChannelSecret,

    /// Request carried no signature header.
    #[error("missing signature header")]
    MissingSignature,

    /// Signature did not match the body.
    #[error("invalid signature")]
    InvalidSignature,

    /// Body was not a webhook payload.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl WebhookError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingChannelSecret => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}
