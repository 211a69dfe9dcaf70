//! Calendar helpers: date literals, stored dates and elapsed-day counting.
//!
//! All dates are plain calendar dates (`NaiveDate`). The streak is counted in
//! the local calendar of the host; there is no timezone handling beyond that.

use chrono::{Local, NaiveDate};

use crate::error::DateLiteralError;

/// Format used when a start date is written to storage and shown to users.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today".
pub trait Clock: Send + Sync {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Number of days in the streak, counting the start date itself as day 1.
///
/// A start date in the future yields zero or a negative count; callers get
/// the raw arithmetic.
pub fn elapsed_days(start: NaiveDate, today: NaiveDate) -> i64 {
    (today - start).num_days() + 1
}

/// Parses a compact `YYYYMMDD` literal from a set-date command.
///
/// # Errors
/// Returns [`DateLiteralError`] if the literal is not exactly eight ASCII
/// digits or does not name a real calendar date.
pub fn parse_date_literal(literal: &str) -> Result<NaiveDate, DateLiteralError> {
    if !literal.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateLiteralError::NotNumeric(literal.to_string()));
    }
    if literal.len() != 8 {
        return Err(DateLiteralError::WrongLength(literal.chars().count()));
    }

    let field = |range: std::ops::Range<usize>| literal[range].parse::<u32>().ok();
    let (Some(year), Some(month), Some(day)) = (field(0..4), field(4..6), field(6..8)) else {
        return Err(DateLiteralError::NotNumeric(literal.to_string()));
    };

    // Year 0 exists in the proleptic calendar but is not a valid start date.
    if year < 1 {
        return Err(DateLiteralError::InvalidDate(literal.to_string()));
    }

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| DateLiteralError::InvalidDate(literal.to_string()))
}

/// Parses a start date as persisted by a store (`YYYY-MM-DD`).
///
/// Surrounding whitespace (e.g. a trailing newline) is ignored. Returns
/// `None` for anything else so callers can fall back to today.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), STORED_DATE_FORMAT).ok()
}

/// Formats a date the way it is stored and shown in replies.
pub fn format_date(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}
