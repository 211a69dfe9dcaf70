//! Outbound reply delivery.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::{LineError, Result};

/// LINE reply endpoint.
pub const REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Request timeout for reply calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends a reply for an inbound message.
///
/// Callers treat delivery as fire-and-forget: errors are reported, never
/// retried.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Client for the LINE Messaging API reply endpoint.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    access_token: Option<String>,
    endpoint: String,
}

impl LineClient {
    /// Creates a client for the public LINE API.
    pub fn new(access_token: Option<String>) -> Result<Self> {
        Self::with_endpoint(access_token, REPLY_ENDPOINT)
    }

    /// Creates a client that posts to a custom endpoint.
    pub fn with_endpoint(access_token: Option<String>, endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            access_token,
            endpoint: endpoint.into(),
        })
    }

    /// Whether an access token is configured.
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
        let token = self.access_token.as_deref().ok_or(LineError::NoToken)?;

        let request = ReplyRequest {
            reply_token,
            messages: [TextMessage { kind: "text", text }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = %status, "Reply delivered");
        Ok(())
    }
}
