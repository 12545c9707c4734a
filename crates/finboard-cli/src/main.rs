//! finboard CLI - Personal finance dashboard
//!
//! Usage:
//!   finboard dashboard              Fetch the API and show one refresh
//!   finboard dashboard --watch      Refresh on Enter, q to quit
//!   finboard serve --port 3000      Start the financial API server
//!   finboard config                 Show the resolved configuration

mod cli;
mod commands;
mod render;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Dashboard {
            api_url,
            json,
            fallback,
            watch,
            date,
        } => {
            let options = commands::DashboardOptions {
                api_url,
                json,
                fallback,
                watch,
                date,
            };
            commands::cmd_dashboard(config_path, options).await
        }
        Commands::Serve {
            port,
            host,
            ledger,
            static_dir,
        } => {
            commands::cmd_serve(
                config_path,
                &host,
                port,
                ledger.as_deref(),
                static_dir.as_deref(),
            )
            .await
        }
        Commands::Config => commands::cmd_config(config_path),
    }
}
