//! Shared configuration for the sobriety bot.
//!
//! Names of the environment variables the bot reads and the default location
//! of the start-date file.
//!
//! # Environment Variables
//!
//! - `LINE_CHANNEL_SECRET`: secret used to verify webhook signatures
//! - `LINE_CHANNEL_ACCESS_TOKEN`: bearer token for the reply API
//! - `START_DATE`: fixed start date (`YYYY-MM-DD`) for the environment store
//! - `START_DATE_FILE`: path of the start-date file for the file store
//! - `SOBRIETY_STATE_DIR`: override the base state directory
//! - `PORT`: port the webhook server listens on

use std::path::PathBuf;

/// Environment variable holding the LINE channel secret.
pub const CHANNEL_SECRET_ENV: &str = "LINE_CHANNEL_SECRET";

/// Environment variable holding the LINE channel access token.
pub const CHANNEL_ACCESS_TOKEN_ENV: &str = "LINE_CHANNEL_ACCESS_TOKEN";

/// Environment variable holding a fixed start date.
pub const START_DATE_ENV: &str = "START_DATE";

/// Environment variable overriding the start-date file path.
pub const START_DATE_FILE_ENV: &str = "START_DATE_FILE";

/// Environment variable for a custom state directory.
pub const STATE_DIR_ENV: &str = "SOBRIETY_STATE_DIR";

/// Environment variable for the listen port.
pub const PORT_ENV: &str = "PORT";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".sobriety-bot";

/// File name of the persisted start date.
const START_DATE_FILE_NAME: &str = "start_date.txt";

/// Get the state directory.
///
/// The state directory is determined by:
/// 1. `SOBRIETY_STATE_DIR` environment variable if set
/// 2. `~/.sobriety-bot` if home directory is available
/// 3. `.sobriety-bot` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the start-date file path.
///
/// `START_DATE_FILE` wins; otherwise `start_date.txt` in [`state_dir`].
pub fn start_date_file() -> PathBuf {
    std::env::var(START_DATE_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(START_DATE_FILE_NAME))
}

/// Reads a non-empty environment variable.
pub fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
