//! Sobriety LINE bot binary.
//!
//! Start the bot with:
//! ```bash
//! LINE_CHANNEL_SECRET=xxx LINE_CHANNEL_ACCESS_TOKEN=yyy cargo run -p sobriety-line
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sobriety_core::config::{self, DEFAULT_PORT};
use sobriety_core::LocalClock;
use sobriety_line::{serve, AppState, GatewayConfig, LineClient, StoreKind, Tracker};
use tracing_subscriber::EnvFilter;

/// Sobriety Bot - count the days since you stopped drinking, over LINE
#[derive(Parser, Debug)]
#[command(name = "sobriety-line")]
#[command(about = "LINE webhook bot that tracks a sobriety streak")]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = config::PORT_ENV, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Where the start date is kept
    #[arg(short, long, value_enum, default_value_t = StoreKind::File)]
    store: StoreKind,

    /// Start-date file for the file store
    #[arg(long, env = config::START_DATE_FILE_ENV)]
    data_file: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env.local or .env before parsing so env-backed flags see them
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    let args = Args::parse();

    let filter = match args.verbose {
        0 => "sobriety_line=info,sobriety_persistence=info,sobriety_core=info",
        1 => "sobriety_line=debug,sobriety_persistence=debug,sobriety_core=debug,tower_http=info",
        2 => "sobriety_line=trace,sobriety_persistence=trace,sobriety_core=trace,tower_http=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_file = args.data_file.unwrap_or_else(config::start_date_file);
    let store = args.store.open(&data_file);

    let config = GatewayConfig::from_env(args.host, args.port);
    if config.channel_secret.is_none() {
        tracing::warn!(
            "{} not set; webhook calls will be rejected with 500",
            config::CHANNEL_SECRET_ENV
        );
    }
    if config.channel_access_token.is_none() {
        tracing::warn!(
            "{} not set; replies cannot be delivered",
            config::CHANNEL_ACCESS_TOKEN_ENV
        );
    }

    let client = LineClient::new(config.channel_access_token.clone())?;
    let tracker = Tracker::new(store, Arc::new(LocalClock));

    tracing::info!(
        store = %tracker.store_description().await,
        start = ?tracker.current_start().await,
        "Tracker ready"
    );

    let state = AppState::new(config, tracker, Arc::new(client));
    serve(state).await?;

    Ok(())
}
