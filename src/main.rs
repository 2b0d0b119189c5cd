//! CLI entry point for the cyclone monitor.
//!
//! Provides subcommands for serving the dashboard, fetching either feed once,
//! and exporting a feed's records to CSV.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cyclone_monitor::{
    config::FeedArgs,
    dashboard::TableRow,
    feeds::{fetch_active_storms, fetch_historical_storms},
    fetch::BasicClient,
    models::{ActiveStorm, HistoricalStorm},
    monitor::CycloneMonitor,
    output::{log_records, write_records},
    server,
};
use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cyclone_monitor")]
#[command(about = "Real-time and recent tropical cyclone dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Listen address
        #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen: SocketAddr,

        #[command(flatten)]
        feeds: FeedArgs,
    },
    /// Fetch the currently active storms once
    Active {
        /// Log records as JSON instead of debug output
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        feeds: FeedArgs,
    },
    /// Fetch the latest observation of the most recent storms once
    Historical {
        /// Log records as JSON instead of debug output
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        feeds: FeedArgs,
    },
    /// Write one feed's records to a CSV file
    Export {
        /// Which feed to export
        #[arg(long, value_enum)]
        feed: FeedKind,

        /// CSV file to write
        #[arg(short, long, default_value = "storms.csv")]
        output: String,

        #[command(flatten)]
        feeds: FeedArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FeedKind {
    Active,
    Historical,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/cyclone_monitor.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cyclone_monitor.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, feeds } => {
            feeds.validate()?;
            let client = BasicClient::new(feeds.http_timeout())?;
            let config = feeds.monitor_config();
            info!(
                live_url = %config.live_url,
                historical_url = %config.historical_url,
                live_ttl_secs = config.live_ttl.as_secs(),
                historical_ttl_secs = config.historical_ttl.as_secs(),
                "Starting cyclone dashboard"
            );
            let monitor = Arc::new(CycloneMonitor::new(client, config));
            server::serve(listen, monitor).await?;
        }
        Commands::Active { json, feeds } => {
            feeds.validate()?;
            let client = BasicClient::new(feeds.http_timeout())?;
            let storms = fetch_active_storms(&client, &feeds.live_url).await?;
            log_records(&storms, json, "No active cyclones detected")?;
        }
        Commands::Historical { json, feeds } => {
            feeds.validate()?;
            let client = BasicClient::new(feeds.http_timeout())?;
            let storms =
                fetch_historical_storms(&client, &feeds.historical_url, feeds.historical_limit)
                    .await?;
            log_records(&storms, json, "No historical cyclones retrieved")?;
        }
        Commands::Export {
            feed,
            output,
            feeds,
        } => {
            feeds.validate()?;
            let client = BasicClient::new(feeds.http_timeout())?;
            let rows = match feed {
                FeedKind::Active => {
                    let storms = fetch_active_storms(&client, &feeds.live_url).await?;
                    write_records(&output, &storms, ActiveStorm::HEADERS)?;
                    storms.len()
                }
                FeedKind::Historical => {
                    let storms = fetch_historical_storms(
                        &client,
                        &feeds.historical_url,
                        feeds.historical_limit,
                    )
                    .await?;
                    write_records(&output, &storms, HistoricalStorm::HEADERS)?;
                    storms.len()
                }
            };
            info!(?feed, output = %output, rows, "Export written");
        }
    }

    Ok(())
}
