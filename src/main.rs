//! TradeRiskAnalyzer - Main Entry Point
//!
//! Serves the trade risk API and runs the background batch workers.

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use trade_risk_analyzer::config::load_config;
use trade_risk_analyzer::{serve, AnalysisPipeline, AppState};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Port to listen on; overrides the config file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let mut config = load_config(Some(args.config.as_str()))?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.settings.log_level);
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting TradeRiskAnalyzer");
    info!("Configuration file: {}", args.config);

    let shutdown = CancellationToken::new();
    let pipeline = AnalysisPipeline::new(&config);
    let workers = pipeline.spawn_workers(&shutdown);
    let state = AppState::new(&pipeline, &config, shutdown.clone())?;

    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    let server = tokio::spawn(serve(listener, state, shutdown.clone()));

    info!("Application initialized successfully");

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, cleaning up...");
    shutdown.cancel();

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "HTTP server failed"),
        Err(e) => error!(error = %e, "HTTP server task panicked"),
    }

    for worker in workers {
        match worker.await {
            Ok(stats) => info!(?stats, "Worker joined"),
            Err(e) => error!(error = %e, "Worker task panicked"),
        }
    }

    info!("Shutdown complete");
    Ok(())
}
