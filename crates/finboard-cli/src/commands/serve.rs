//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use finboard_core::{CsvLedger, LedgerSource, NotionSource};
use finboard_server::ServerConfig;

use super::load_config;

/// Pick the ledger: a CSV file when given, Notion from the environment otherwise
pub fn ledger_source(ledger: Option<&Path>) -> Result<Arc<dyn LedgerSource>> {
    match ledger {
        Some(path) => {
            let ledger = CsvLedger::open(path)
                .with_context(|| format!("Failed to open ledger {}", path.display()))?;
            Ok(Arc::new(ledger))
        }
        None => Ok(Arc::new(NotionSource::from_env())),
    }
}

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    ledger: Option<&Path>,
    static_dir: Option<&Path>,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let source = ledger_source(ledger)?;

    println!("🚀 Starting finboard API server...");
    match ledger {
        Some(path) => println!("   Ledger: {} (CSV)", path.display()),
        None => {
            println!("   Ledger: Notion");
            if !NotionSource::from_env().is_configured() {
                println!();
                println!("   ⚠️  Notion not configured - every total will be zero");
                println!("      Set NOTION_TOKEN, NOTION_INCOME_DB and NOTION_EXPENSES_DB");
            }
        }
    }
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!();

    let server_config = ServerConfig {
        static_dir: static_dir.map(Path::to_path_buf),
        ..ServerConfig::from_env()
    };

    finboard_server::serve_with_config(source, config, server_config, host, port).await
}
