//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Resolved configuration display and shared loading
//! - `dashboard` - Fetch, derive and render the dashboard (one-shot or watch)
//! - `serve` - Financial API server command

pub mod config;
pub mod dashboard;
pub mod serve;

// Re-export command functions for main.rs
pub use config::*;
pub use dashboard::*;
pub use serve::*;
