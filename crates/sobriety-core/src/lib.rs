//! Sobriety Core - the streak logic shared by every bot surface.
//!
//! This crate knows nothing about chat platforms or storage backends:
//!
//! - **calendar**: date-literal parsing, elapsed-day arithmetic and the clock
//! - **config**: environment variable names and default file locations
//! - **error**: errors raised while reading a set-date command
//! - **interpreter**: classify an inbound message and build the reply

pub mod calendar;
pub mod config;
pub mod error;
pub mod interpreter;

pub use calendar::{
    elapsed_days, format_date, parse_date_literal, parse_stored_date, Clock, FixedClock,
    LocalClock, STORED_DATE_FORMAT,
};
pub use error::{CommandError, DateLiteralError};
pub use interpreter::{classify, interpret, Command, Outcome, COMMAND_PREFIX};
