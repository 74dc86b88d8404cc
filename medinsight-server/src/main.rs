//! MedInsight Server - Headless Daemon
//!
//! A Rust HTTP server and CLI that:
//! - Generates X-ray, CT, ultrasound and report-analysis write-ups via Gemini
//! - Retries rate-limited and overloaded models, then falls back to the next
//! - Recommends hospitals from a report analysis
//! - Exposes a REST API on /api/* and one-shot generation on the command line
//!
//! Access via: http://localhost:8501

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod cli;
mod commands;
mod config_commands;
mod generate_command;
mod recommend_command;
mod router;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use medinsight_core::modules::{config as core_config, logger};
use medinsight_core::GeminiClient;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Config(cmd)) => commands::handle_config_command(cmd),
        Some(Commands::Generate(args)) => generate_command::generate_report(args).await,
        Some(Commands::Recommend(args)) => recommend_command::recommend_hospitals(args).await,
        Some(Commands::Serve) | None => run_server(cli.port).await,
    }
}

async fn run_server(port_override: Option<u16>) -> Result<()> {
    let mut config = core_config::load_effective_config()?;
    if let Some(port) = port_override {
        config.server.port = port;
    }
    config.validate_all()?;

    info!("🚀 MedInsight Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let client = GeminiClient::new(&config.gemini)?;
    if !client.has_api_key() {
        warn!("⚠️ No Gemini API key configured; set GEMINI_API_KEY or run `config set gemini.api_key`");
    }

    let addr = config.server.socket_addr();
    let state = AppState::new(Arc::new(client), &config);
    let app = router::build_router(state);

    let listener = server_utils::create_listener(&addr).await?;
    info!("🌐 Server listening on http://{}", addr);
    info!("🔌 API available at http://{}/api/", addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}
