//! Plagiarism Report Server
//!
//! Checks submitted content against the Winston AI plagiarism service and
//! turns the result into a downloadable PDF report. Provides REST API
//! endpoints for:
//!
//! - Plagiarism detection
//! - Report preview and generation
//! - Download of previously generated reports
//!
//! Configuration comes from command-line flags, with the API key also read
//! from `WINSTON_API_KEY` (a `.env` file is loaded first if present).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod detector;
mod error;
mod spool;
mod state;
mod store;
mod validation;

use detector::{DetectorConfig, WinstonDetector, DEFAULT_DETECTOR_URL};
use state::AppState;
use store::{FsReportStore, MemoryReportStore, ReportStore, DEFAULT_MEMORY_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Memory,
    Filesystem,
}

/// Command-line arguments for the report server
#[derive(Parser, Debug)]
#[command(name = "report-server")]
#[command(about = "Plagiarism detection and PDF report server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Report render timeout in milliseconds
    #[arg(long, default_value = "30000")]
    render_timeout_ms: u64,

    /// Detection request timeout in milliseconds
    #[arg(long, default_value = "60000")]
    detect_timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Plagiarism detection endpoint
    #[arg(long, default_value = DEFAULT_DETECTOR_URL)]
    detector_url: String,

    /// Detection API key
    #[arg(long, env = "WINSTON_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Language sent with detection requests
    #[arg(long, default_value = "en")]
    language: String,

    /// Country sent with detection requests
    #[arg(long, default_value = "us")]
    country: String,

    /// Where generated reports are kept
    #[arg(long, value_enum, default_value = "memory")]
    store: StoreKind,

    /// Reports kept by the memory store before the oldest is evicted
    #[arg(long, default_value_t = DEFAULT_MEMORY_CAPACITY)]
    memory_capacity: usize,

    /// Directory for the filesystem store
    #[arg(long, default_value = "reports")]
    store_dir: PathBuf,

    /// Directory for transient report files (defaults to the system temp dir)
    #[arg(long)]
    spool_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so env-backed flags see it
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting report server on {}:{}", args.host, args.port);

    let detector = WinstonDetector::new(DetectorConfig {
        url: args.detector_url.clone(),
        api_key: args.api_key.clone(),
        language: args.language.clone(),
        country: args.country.clone(),
        timeout: Duration::from_millis(args.detect_timeout_ms),
    })?;

    let store: Arc<dyn ReportStore> = match args.store {
        StoreKind::Memory => Arc::new(MemoryReportStore::with_capacity(args.memory_capacity)),
        StoreKind::Filesystem => Arc::new(FsReportStore::open(&args.store_dir)?),
    };

    let spool_dir = args.spool_dir.clone().unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&spool_dir)?;

    let state = AppState::new(
        Arc::new(detector),
        store,
        spool_dir,
        Duration::from_millis(args.render_timeout_ms),
    );

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let app = api::router(state).layer(GovernorLayer {
        config: governor_conf,
    });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Render timeout: {}ms", args.render_timeout_ms);
    info!("Report store: {:?}", args.store);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
