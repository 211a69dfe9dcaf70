//! The streak tracker: owns the start-date store and answers messages.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use sobriety_core::interpreter::{READ_ONLY_REPLY, SAVE_FAILED_REPLY};
use sobriety_core::{interpret, Clock};
use sobriety_persistence::{PersistenceError, StartDateStore};
use tokio::task::JoinError;
use tracing::{error, info, warn};

/// Answers inbound text against the single global start date.
///
/// The store sits behind one mutex held across load, interpret and save, so
/// concurrent messages are applied one at a time. Store access runs on the
/// blocking pool since backends do synchronous file I/O.
pub struct Tracker {
    store: Arc<Mutex<Box<dyn StartDateStore>>>,
    clock: Arc<dyn Clock>,
}

impl Tracker {
    /// Creates a tracker over `store`, reading today's date from `clock`.
    pub fn new(store: Box<dyn StartDateStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            clock,
        }
    }

    /// Runs `f` with exclusive access to the store on a blocking thread.
    async fn with_store<R, F>(&self, f: F) -> Result<R, JoinError>
    where
        F: FnOnce(&mut Box<dyn StartDateStore>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            // A panic in a previous holder leaves the date itself intact.
            let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        })
        .await
    }

    /// Handles one message and returns the reply text.
    ///
    /// Never fails: rejected commands and storage problems become reply text.
    pub async fn handle_text(&self, text: &str) -> String {
        let text = text.to_string();
        let clock = Arc::clone(&self.clock);

        let result = self
            .with_store(move |store| {
                let today = clock.today();
                let outcome = interpret(&text, store.load(), today);

                let Some(start) = outcome.new_start else {
                    return outcome.reply;
                };

                match store.save(start) {
                    Ok(()) => {
                        info!(start = %start, store = %store.describe(), "Start date updated");
                        outcome.reply
                    }
                    Err(PersistenceError::ReadOnly(source)) => {
                        warn!(store = %source, "Set-date command on read-only store");
                        READ_ONLY_REPLY.to_string()
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to save start date");
                        SAVE_FAILED_REPLY.to_string()
                    }
                }
            })
            .await;

        result.unwrap_or_else(|e| {
            error!(error = %e, "Start date task failed");
            SAVE_FAILED_REPLY.to_string()
        })
    }

    /// The stored start date, if any.
    pub async fn current_start(&self) -> Option<NaiveDate> {
        self.with_store(|store| store.load()).await.ok().flatten()
    }

    /// Description of the backing store.
    pub async fn store_description(&self) -> String {
        self.with_store(|store| store.describe())
            .await
            .unwrap_or_else(|_| "unavailable".to_string())
    }
}
