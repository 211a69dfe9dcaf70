//! Persistence layer for the sobriety bot.
//!
//! The whole system stores exactly one value: the start date of the streak.
//! Every backend implements [`StartDateStore`]:
//!
//! - [`FileStore`]: a plain-text file holding `YYYY-MM-DD`, written atomically
//!   (write to temp file, then rename)
//! - [`EnvStore`]: a fixed date taken from `START_DATE` at startup, read-only
//! - [`MemoryStore`]: an in-process value
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use sobriety_persistence::{FileStore, StartDateStore};
//!
//! let mut store = FileStore::new("/var/lib/sobriety/start_date.txt");
//!
//! let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! store.save(date).unwrap();
//!
//! assert_eq!(store.load(), Some(date));
//! ```

pub mod atomic;
pub mod error;
pub mod store;

pub use error::{PersistenceError, Result};
pub use store::{EnvStore, FileStore, MemoryStore, StartDateStore};
