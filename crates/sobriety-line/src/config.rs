//! Gateway configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::ValueEnum;
use sobriety_core::config::{non_empty_env, CHANNEL_ACCESS_TOKEN_ENV, CHANNEL_SECRET_ENV};
use sobriety_persistence::{EnvStore, FileStore, MemoryStore, StartDateStore};

/// Webhook server configuration.
///
/// Credentials are optional here: a missing secret or token is reported
/// per request rather than at startup.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Secret used to verify webhook signatures.
    pub channel_secret: Option<String>,
    /// Bearer token for the reply API.
    pub channel_access_token: Option<String>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayConfig {
    /// Creates a configuration with no credentials.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            channel_secret: None,
            channel_access_token: None,
            start_time: Instant::now(),
        }
    }

    /// Creates a configuration with credentials taken from the environment.
    pub fn from_env(host: impl Into<String>, port: u16) -> Self {
        Self::new(host, port)
            .with_channel_secret(non_empty_env(CHANNEL_SECRET_ENV))
            .with_access_token(non_empty_env(CHANNEL_ACCESS_TOKEN_ENV))
    }

    /// Sets the channel secret.
    pub fn with_channel_secret(mut self, secret: Option<String>) -> Self {
        self.channel_secret = secret;
        self
    }

    /// Sets the channel access token.
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.channel_access_token = token;
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", sobriety_core::config::DEFAULT_PORT)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("channel_secret", &redact(&self.channel_secret))
            .field("channel_access_token", &redact(&self.channel_access_token))
            .finish()
    }
}

/// Which backend holds the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Plain-text file, updated by set-date commands.
    File,
    /// `START_DATE` environment variable, read-only.
    Env,
    /// Process memory; lost on restart.
    Memory,
}

impl StoreKind {
    /// Opens the store. `data_file` is only used by [`StoreKind::File`].
    pub fn open(self, data_file: &Path) -> Box<dyn StartDateStore> {
        match self {
            StoreKind::File => Box::new(FileStore::new(PathBuf::from(data_file))),
            StoreKind::Env => Box::new(EnvStore::from_env()),
            StoreKind::Memory => Box::new(MemoryStore::default()),
        }
    }
}
