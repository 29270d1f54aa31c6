//! duel_server binary.

use anyhow::Result;
use clap::Parser;
use duel_server::cli::{Cli, Command};
use duel_server::{DuelConfig, Lobby, play_local, serve};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,duel_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Local => run_local(),
    }
}

/// Run the HTTP lobby server
#[instrument]
async fn run_server(config: PathBuf, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = DuelConfig::load(&config)?;
    config.server_mut().override_with(host, port);

    info!(addr = %config.server().bind_addr(), "Starting duel server");
    let lobby = Lobby::new(config.lobby().clone());
    serve(config.server(), lobby).await
}

/// Play a hot-seat game on stdin/stdout
fn run_local() -> Result<()> {
    let stdin = std::io::stdin();
    let state = play_local(stdin.lock(), std::io::stdout())?;
    info!(status = %state.status(), "Done");
    Ok(())
}
