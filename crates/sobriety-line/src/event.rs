//! Webhook payload types.
//!
//! Only the parts of the LINE event schema the bot acts on are modelled.
//! Unknown event and message types deserialize to `Unsupported` and are
//! skipped.

use serde::Deserialize;

/// Body of a webhook call.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user ID the events are addressed to.
    #[serde(default)]
    pub destination: Option<String>,
    /// Events in delivery order. LINE sends an empty list to verify the URL.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    /// User sent a message.
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        message: MessageContent,
    },
    /// Follow, unfollow, postback and everything else.
    #[serde(other)]
    Unsupported,
}

/// Content of a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

/// A text message the bot can answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundText {
    pub text: String,
    pub reply_token: String,
}

impl WebhookPayload {
    /// Text messages that carry a reply token, in delivery order.
    pub fn text_messages(&self) -> Vec<InboundText> {
        self.events
            .iter()
            .filter_map(|event| match event {
                WebhookEvent::Message {
                    reply_token: Some(reply_token),
                    message: MessageContent::Text { text },
                } => Some(InboundText {
                    text: text.clone(),
                    reply_token: reply_token.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}
