//! Start-date store backends.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sobriety_core::config::{non_empty_env, START_DATE_ENV};
use sobriety_core::{format_date, parse_stored_date};
use tracing::{debug, warn};

use crate::atomic::{atomic_write, read_text_optional};
use crate::error::{PersistenceError, Result};

/// Provider of the single start date.
///
/// `load` never fails: a missing or unreadable value is `None`, and the
/// caller counts from today. Backends that cannot be written keep the
/// default `save`, which reports [`PersistenceError::ReadOnly`].
pub trait StartDateStore: Send + Sync {
    /// Returns the stored start date, if there is a usable one.
    fn load(&self) -> Option<NaiveDate>;

    /// Replaces the stored start date.
    fn save(&mut self, date: NaiveDate) -> Result<()> {
        debug!(date = %date, "Rejecting save on read-only store");
        Err(PersistenceError::ReadOnly(self.describe()))
    }

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Start date kept in a plain-text file as `YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StartDateStore for FileStore {
    fn load(&self) -> Option<NaiveDate> {
        let raw = match read_text_optional(&self.path) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(path = %self.path.display(), "No start date file");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read start date file");
                return None;
            }
        };

        let date = parse_stored_date(&raw);
        if date.is_none() {
            warn!(path = %self.path.display(), content = %raw.trim(), "Start date file is not a valid date");
        }
        date
    }

    fn save(&mut self, date: NaiveDate) -> Result<()> {
        atomic_write(&self.path, format_date(date).as_bytes())?;
        debug!(path = %self.path.display(), date = %date, "Saved start date");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Start date fixed by the `START_DATE` environment variable.
///
/// The variable is read once, when the store is built.
#[derive(Debug, Clone)]
pub struct EnvStore {
    date: Option<NaiveDate>,
}

impl EnvStore {
    /// Builds the store from a raw `YYYY-MM-DD` value.
    pub fn new(raw: Option<&str>) -> Self {
        let date = raw.and_then(|raw| {
            let parsed = parse_stored_date(raw);
            if parsed.is_none() {
                warn!(value = %raw, "{} is not a valid YYYY-MM-DD date", START_DATE_ENV);
            }
            parsed
        });
        Self { date }
    }

    /// Builds the store from the process environment.
    pub fn from_env() -> Self {
        Self::new(non_empty_env(START_DATE_ENV).as_deref())
    }
}

impl StartDateStore for EnvStore {
    fn load(&self) -> Option<NaiveDate> {
        self.date
    }

    fn describe(&self) -> String {
        format!("environment variable {}", START_DATE_ENV)
    }
}

/// Start date held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    date: Option<NaiveDate>,
}

impl MemoryStore {
    /// Creates a store, optionally pre-seeded with a date.
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self { date }
    }
}

impl StartDateStore for MemoryStore {
    fn load(&self) -> Option<NaiveDate> {
        self.date
    }

    fn save(&mut self, date: NaiveDate) -> Result<()> {
        self.date = Some(date);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
