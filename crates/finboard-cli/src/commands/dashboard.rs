//! Dashboard command implementation

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use finboard_core::{derive_dashboard, ApiClient, Config, Dashboard};

use crate::render::Screen;

use super::load_config;

/// Flags of `finboard dashboard`
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub api_url: Option<String>,
    pub json: bool,
    pub fallback: bool,
    pub watch: bool,
    pub date: Option<NaiveDate>,
}

/// API client from --api-url, then FINBOARD_API_URL, then the config
pub fn resolve_client(api_url: Option<&str>, config: &Config) -> ApiClient {
    match api_url {
        Some(url) => ApiClient::new(url),
        None => ApiClient::from_env().unwrap_or_else(|| ApiClient::new(&config.api_base_url)),
    }
}

/// Fetch one snapshot and derive the dashboard from it
pub async fn refresh(
    client: &ApiClient,
    config: &Config,
    fallback: bool,
    date: Option<NaiveDate>,
) -> Result<Dashboard> {
    let snapshot = if fallback {
        client.fetch_snapshot_or_sample().await
    } else {
        client.fetch_snapshot().await.with_context(|| {
            format!(
                "Financial API unavailable at {} (use --fallback to show sample data)",
                client.base_url()
            )
        })?
    };

    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let dashboard = derive_dashboard(&snapshot, config, today);
    debug!(
        alerts = dashboard.alerts.len(),
        budgets = dashboard.budgets.len(),
        sample = dashboard.source.is_sample(),
        "Derived dashboard"
    );
    Ok(dashboard)
}

pub async fn cmd_dashboard(config_path: Option<&Path>, options: DashboardOptions) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let client = resolve_client(options.api_url.as_deref(), &config);
    debug!(api = client.base_url(), "Using financial API");

    let stdout = std::io::stdout();
    let color = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let mut screen = Screen::new(stdout, config.display.clone(), color);

    if !options.watch {
        let dashboard = refresh(&client, &config, options.fallback, options.date).await?;
        return show(&mut screen, &dashboard, options.json);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match refresh(&client, &config, options.fallback, options.date).await {
            Ok(dashboard) => show(&mut screen, &dashboard, options.json)?,
            Err(e) => {
                warn!(error = %e, "Refresh failed");
                screen.render_error(&format!("{:#}", e))?;
            }
        }

        write_watch_prompt(&mut io::stdout(), &mut io::stderr(), options.json)?;

        match lines.next_line().await? {
            Some(line) if is_quit(&line) => break,
            Some(_) => continue,
            // stdin closed
            None => break,
        }
    }

    Ok(())
}

fn show<W: Write>(screen: &mut Screen<W>, dashboard: &Dashboard, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(dashboard)?);
    } else {
        screen.render(dashboard)?;
    }
    Ok(())
}

/// Print the watch prompt, on stderr when stdout carries JSON documents
pub fn write_watch_prompt<O: Write, E: Write>(
    stdout: &mut O,
    stderr: &mut E,
    json: bool,
) -> io::Result<()> {
    let target: &mut dyn Write = if json { stderr } else { stdout };
    writeln!(target)?;
    writeln!(target, "  Press Enter to refresh, q to quit")?;
    target.flush()
}

/// Whether a watch-mode input line asks to quit
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "q" | "quit" | "exit")
}
