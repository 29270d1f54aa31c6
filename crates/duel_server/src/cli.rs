//! Command-line interface for duel_server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe duels: lobby, challenges and live game sync over HTTP
#[derive(Parser, Debug)]
#[command(name = "duel_server")]
#[command(about = "Two-player tic-tac-toe server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP lobby server
    Serve {
        /// Path to the TOML config file (defaults apply if it is missing)
        #[arg(short, long, default_value = "duel.toml")]
        config: PathBuf,

        /// Host to bind to, overriding the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding the config file and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a hot-seat game in this terminal
    Local,
}
