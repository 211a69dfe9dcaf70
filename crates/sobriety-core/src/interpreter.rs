//! Command interpretation for inbound chat text.
//!
//! Every message is one of two things: a set-date command
//! (`禁酒開始 20250901`) or a query. Anything that does not start with the
//! exact prefix is a query, including near-misses of the prefix.
//!
//! [`interpret`] is pure: it takes the stored start date and today's date and
//! returns the reply plus the start date to persist, if any. Loading and
//! saving belong to the caller.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{elapsed_days, format_date, parse_date_literal};
use crate::error::CommandError;

/// Marker that starts a set-date command ("start abstinence").
pub const COMMAND_PREFIX: &str = "禁酒開始";

/// Reply when the set-date command has the wrong number of tokens.
pub const USAGE_REPLY: &str = "例: 禁酒開始 20250901";

/// Reply when the date literal cannot be parsed.
pub const DATE_FORMAT_REPLY: &str = "日付の形式が正しくありません。例: 禁酒開始 20250901";

/// Reply when the start date is fixed by configuration and cannot be changed.
pub const READ_ONLY_REPLY: &str = "開始日は設定で固定されているため変更できません。";

/// Reply when the new start date could not be written.
pub const SAVE_FAILED_REPLY: &str = "開始日を保存できませんでした。しばらくしてからもう一度お試しください。";

/// Classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text began with [`COMMAND_PREFIX`]; carries the parsed date or why it
    /// was rejected.
    SetStart(Result<NaiveDate, CommandError>),
    /// Anything else.
    Query,
}

/// Result of interpreting one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text to send back to the user.
    pub reply: String,
    /// Start date to persist, when the message set one.
    pub new_start: Option<NaiveDate>,
}

impl Outcome {
    fn reply_only(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            new_start: None,
        }
    }
}

/// Classifies a message as a set-date command or a query.
pub fn classify(text: &str) -> Command {
    let text = text.trim();
    if !text.starts_with(COMMAND_PREFIX) {
        return Command::Query;
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 {
        return Command::SetStart(Err(CommandError::WrongTokenCount(tokens.len())));
    }

    Command::SetStart(parse_date_literal(tokens[1]).map_err(CommandError::from))
}

/// Builds the reply for `text`.
///
/// `stored` is the currently persisted start date; when it is `None` the
/// streak is counted from `today`.
pub fn interpret(text: &str, stored: Option<NaiveDate>, today: NaiveDate) -> Outcome {
    match classify(text) {
        Command::SetStart(Ok(start)) => {
            let days = elapsed_days(start, today);
            Outcome {
                reply: format!(
                    "開始日 {} を保存しました。今日は禁酒{}日目です！",
                    format_date(start),
                    days
                ),
                new_start: Some(start),
            }
        }
        Command::SetStart(Err(CommandError::WrongTokenCount(count))) => {
            debug!(tokens = count, "Set-date command with wrong token count");
            Outcome::reply_only(USAGE_REPLY)
        }
        Command::SetStart(Err(CommandError::BadDate(e))) => {
            debug!(error = %e, "Set-date command with bad date literal");
            Outcome::reply_only(DATE_FORMAT_REPLY)
        }
        Command::Query => {
            let start = stored.unwrap_or(today);
            Outcome::reply_only(status_reply(start, today))
        }
    }
}

/// Status line for a query.
pub fn status_reply(start: NaiveDate, today: NaiveDate) -> String {
    format!(
        "今日は禁酒{}日目です！（開始日: {}）",
        elapsed_days(start, today),
        format_date(start)
    )
}
