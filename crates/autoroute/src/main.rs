// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autoroute - automatic model selection for chat-completion traffic.
//!
//! This is the binary entry point for the Autoroute gateway.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod inspect;
mod route;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Autoroute - automatic model selection for chat-completion traffic.
#[derive(Parser, Debug)]
#[command(name = "autoroute", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard search path.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the auto-routing gateway.
    Serve,
    /// Route a single request body and print the outcome.
    Route {
        /// Request JSON file. Reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Print the model capability table.
    Models,
    /// Validate and print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => autoroute_config::load_and_validate_path(path),
        None => autoroute_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            autoroute_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Route { file }) => route::run_route(&config, file.as_deref()),
        Some(Commands::Models) => inspect::run_models(&config),
        Some(Commands::Config) => inspect::run_config(&config),
        None => {
            println!("autoroute: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("autoroute: {e}");
        std::process::exit(1);
    }
}
