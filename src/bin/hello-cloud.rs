//! HTTP service reporting health and the detected cloud environment.

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use hello_cloud::config::{DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, DEFAULT_LOG_FILTER};
use hello_cloud::providers::{aws, gcp};
use hello_cloud::{create_router, AppState, CloudDetector, DetectionCache, DetectorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hello-cloud")]
#[command(
    author,
    version,
    about = "Report service health and the cloud environment it runs in"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HTTP_HOST, global = true)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_HTTP_PORT, global = true)]
    port: u16,

    #[command(flatten)]
    detection: DetectionArgs,

    /// Log level filter (e.g., "hello_cloud=debug,tower_http=info")
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,

    /// Detect the cloud environment once and print it as JSON
    Detect,
}

#[derive(Args)]
struct DetectionArgs {
    /// Region reported when no cloud provider is detected
    #[arg(long, env = "REGION", global = true)]
    region: Option<String>,

    /// AWS instance metadata service base URL
    #[arg(long, env = "AWS_METADATA_URL", default_value = aws::DEFAULT_BASE_URL, global = true)]
    aws_metadata_url: String,

    /// GCP metadata server base URL
    #[arg(long, env = "GCP_METADATA_URL", default_value = gcp::DEFAULT_BASE_URL, global = true)]
    gcp_metadata_url: String,
}

impl DetectionArgs {
    fn into_config(self) -> DetectorConfig {
        DetectorConfig {
            aws_base_url: self.aws_metadata_url,
            gcp_base_url: self.gcp_metadata_url,
            ..DetectorConfig::default()
        }
        .with_fallback_region(self.region)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Priority: CLI > env > default
    let log_filter = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let detector = CloudDetector::from_config(&cli.detection.into_config())?;

    match cli.command {
        Some(Commands::Detect) => {
            let info = detector.detect().await;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }

        Some(Commands::Serve) | None => serve(detector, &cli.host, cli.port).await,
    }
}

async fn serve(
    detector: CloudDetector,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(DetectionCache::new(detector));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
