//! LINE gateway for the sobriety bot.
//!
//! Receives signed webhook calls from the LINE Messaging API, runs every
//! inbound text message through the tracker, and replies through the LINE
//! reply API.
//!
//! # Endpoints
//!
//! - `POST /callback` - LINE webhook (requires `x-line-signature`)
//! - `GET /` - static liveness text
//! - `GET /health` - JSON health status
//!
//! # Environment Variables
//!
//! Required for real traffic:
//! - `LINE_CHANNEL_SECRET`: verifies webhook signatures (500 if unset)
//! - `LINE_CHANNEL_ACCESS_TOKEN`: authorizes replies
//!
//! Optional:
//! - `PORT`: listen port (default: 5000)
//! - `START_DATE_FILE`: start-date file for the file store
//! - `START_DATE`: fixed start date for the environment store
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sobriety_core::LocalClock;
//! use sobriety_line::{serve, AppState, GatewayConfig, LineClient, Tracker};
//! use sobriety_persistence::FileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_env("0.0.0.0", 5000);
//!     let client = LineClient::new(config.channel_access_token.clone())?;
//!     let tracker = Tracker::new(Box::new(FileStore::new("start_date.txt")), Arc::new(LocalClock));
//!
//!     let state = AppState::new(config, tracker, Arc::new(client));
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod router;
pub mod signature;
pub mod state;
pub mod tracker;

pub use client::{LineClient, ReplySender};
pub use config::{GatewayConfig, StoreKind};
pub use error::{LineError, Result, WebhookError};
pub use event::{InboundText, WebhookPayload};
pub use router::{create_router, serve};
pub use signature::{sign, verify_signature, SIGNATURE_HEADER};
pub use state::AppState;
pub use tracker::Tracker;
