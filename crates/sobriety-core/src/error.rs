//! Error types for command parsing.

use thiserror::Error;

/// Why a date literal could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateLiteralError {
    /// The literal is not exactly eight characters long.
    #[error("expected 8 digits, got {0} characters")]
    WrongLength(usize),

    /// The literal contains something other than ASCII digits.
    #[error("date literal must be numeric: {0}")]
    NotNumeric(String),

    /// Digits are fine but the date does not exist (e.g. month 13).
    #[error("not a calendar date: {0}")]
    InvalidDate(String),
}

/// Why a set-date command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command did not have exactly one argument.
    #[error("expected prefix and one date, got {0} tokens")]
    WrongTokenCount(usize),

    /// The argument was not a usable date literal.
    #[error("bad date literal: {0}")]
    BadDate(#[from] DateLiteralError),
}
