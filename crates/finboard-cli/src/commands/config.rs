//! Configuration command and shared loading

use std::path::Path;

use anyhow::{Context, Result};

use finboard_core::{Config, ConfigOrigin};

/// Resolve the configuration for a command
pub fn load_config(path: Option<&Path>) -> Result<(Config, ConfigOrigin)> {
    let (config, origin) = Config::load(path).context("Failed to load configuration")?;
    tracing::debug!(origin = %origin, "Using configuration");
    Ok((config, origin))
}

pub fn cmd_config(path: Option<&Path>) -> Result<()> {
    let (config, origin) = load_config(path)?;

    println!();
    println!("⚙️  Configuration ({})", origin);
    println!("   ─────────────────────────────");
    println!("   API:       {}", config.api_base_url);
    println!("   Currency:  {}", config.display.currency_symbol);
    println!();
    println!("   🔔 Alerts");
    println!(
        "      Warning at {:.0}% of income spent",
        config.alerts.expense_warning_ratio * 100.0
    );
    println!(
        "      Positive below {:.0}% of income spent",
        config.alerts.positive_ratio * 100.0
    );
    match config.alerts.cushion_balance {
        Some(cushion) => println!("      Cushion at {}", config.display.money(cushion)),
        None => println!("      Cushion alert disabled"),
    }
    println!();
    println!(
        "   🎯 Budgets (warning {:.0}%, exceeded {:.0}%, default {})",
        config.budgets.warning_percent,
        config.budgets.exceeded_percent,
        config.display.money(config.budgets.default_limit)
    );
    for limit in &config.budgets.limits {
        println!(
            "      {} {:<18} {}",
            limit.icon.as_deref().unwrap_or("•"),
            limit.category,
            config.display.money(limit.limit)
        );
    }
    println!();
    println!(
        "   🔮 Projection factors: optimistic ×{:.2}, pessimistic ×{:.2}",
        config.projection.optimistic, config.projection.pessimistic
    );

    if matches!(origin, ConfigOrigin::Embedded) {
        if let Some(path) = finboard_core::config::default_config_path() {
            println!();
            println!("   Override with: {}", path.display());
        }
    }

    Ok(())
}
