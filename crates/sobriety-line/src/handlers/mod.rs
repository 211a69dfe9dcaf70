//! HTTP request handlers.

pub mod health;
pub mod webhook;

pub use health::*;
pub use webhook::*;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use sobriety_core::FixedClock;
    use sobriety_persistence::MemoryStore;

    use crate::client::ReplySender;
    use crate::config::GatewayConfig;
    use crate::error::{LineError, Result};
    use crate::state::AppState;
    use crate::tracker::Tracker;

    pub const SECRET: &str = "test-channel-secret";

    /// Records replies instead of sending them.
    #[derive(Default)]
    pub struct RecordingSender {
        pub replies: Mutex<Vec<(String, String)>>,
        pub fail: bool,
    }

    #[async_trait]
    impl ReplySender for RecordingSender {
        async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
            self.replies
                .lock()
                .unwrap()
                .push((reply_token.to_string(), text.to_string()));
            if self.fail {
                return Err(LineError::Api {
                    status: 400,
                    body: "Invalid reply token".into(),
                });
            }
            Ok(())
        }
    }

    pub fn make_test_state(
        secret: Option<&str>,
        today: NaiveDate,
        sender: Arc<RecordingSender>,
    ) -> AppState {
        let config = GatewayConfig::default().with_channel_secret(secret.map(String::from));
        let tracker = Tracker::new(Box::new(MemoryStore::default()), Arc::new(FixedClock(today)));
        AppState::new(config, tracker, sender)
    }
}
