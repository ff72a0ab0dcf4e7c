//! leadscore-ai - Lead scoring microservice
//!
//! Serves:
//! - `POST /api/analyze-lead`: composite lead score for one message
//! - `GET /api/health`: liveness
//! - `GET /`: web form
//!
//! Startup aborts (non-zero exit) when no provider API key is configured or
//! the provider probe fails; there is no partial-service mode.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use leadscore_ai::cli::ProviderArgs;
use leadscore_ai::{build_router, startup, AppState};

/// Command-line arguments for leadscore-ai
#[derive(Parser, Debug)]
#[command(name = "leadscore-ai")]
#[command(about = "Lead scoring microservice (sentiment + LLM composite score)")]
#[command(version)]
struct Args {
    #[command(flatten)]
    provider: ProviderArgs,

    /// Host to bind (else LEADSCORE_HOST, default 0.0.0.0)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (else PORT, default 5000)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut overrides = args.provider.overrides();
    overrides.host = args.host;
    overrides.port = args.port;

    let config = startup::init("leadscore-ai", &overrides)?;

    let scorer = startup::build_scorer(&config).await?;
    info!(model = %scorer.analyzer().model(), "Scoring pipeline ready");

    let app = build_router(AppState::new(scorer));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on http://{}", bind_address);
    info!("Health check: http://{}/api/health", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
