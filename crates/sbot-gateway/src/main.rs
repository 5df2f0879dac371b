//! sbot-gateway - HTTP front door for a Scuttlebutt pub.
//!
//! Connects to the local `sbot`, renders its identity once, then serves the
//! identity page, fresh invitations and the message viewer.

use std::sync::Arc;

use axum::http::Request;
use clap::Parser;
use sbot_gateway_core::{SbotClient, metrics};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sbot_gateway::{AppState, Config, app};

/// sbot-gateway - publish a pub's identity and hand out invitations.
#[derive(Parser, Debug)]
#[command(name = "sbot-gateway")]
#[command(about = "HTTP gateway for a Scuttlebutt pub", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Override the listening port (HTTP_PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env_with_port(args.port)?;
    let bind_addr = config.bind_addr();

    if let Some(port) = config.metrics_port {
        let handle = metrics::init_metrics()?;
        metrics::start_metrics_server(port, handle).await?;
    }

    // Ask the node who it is; the identity never changes while we run
    let node = SbotClient::connect(&config.sbot_bin).await?;

    // Create application state
    let state = AppState::new(config, Arc::new(node))?;

    // Build router with middleware
    let app = app(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
