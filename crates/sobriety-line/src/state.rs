//! Application state shared across handlers.

use std::sync::Arc;

use crate::client::ReplySender;
use crate::config::GatewayConfig;
use crate::tracker::Tracker;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Streak tracker owning the start-date store.
    pub tracker: Arc<Tracker>,
    /// Reply delivery.
    pub sender: Arc<dyn ReplySender>,
}

impl AppState {
    /// Creates a new AppState with all components.
    pub fn new(config: GatewayConfig, tracker: Tracker, sender: Arc<dyn ReplySender>) -> Self {
        Self {
            config: Arc::new(config),
            tracker: Arc::new(tracker),
            sender,
        }
    }
}
