//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// finboard - Personal finance dashboard
#[derive(Parser)]
#[command(name = "finboard")]
#[command(about = "Personal finance dashboard with alerts and projections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data-dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the financial API and show the dashboard
    Dashboard {
        /// Financial API base URL (overrides FINBOARD_API_URL and the config)
        #[arg(long)]
        api_url: Option<String>,

        /// Print the derived dashboard as JSON
        #[arg(long)]
        json: bool,

        /// Show labelled sample data when the API is unavailable
        #[arg(long)]
        fallback: bool,

        /// Keep running; Enter refreshes, q quits
        #[arg(short, long)]
        watch: bool,

        /// Projection date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Start the financial API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Serve a local CSV ledger instead of Notion
        #[arg(long)]
        ledger: Option<PathBuf>,

        /// Static files directory (for a web frontend)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config,
}
