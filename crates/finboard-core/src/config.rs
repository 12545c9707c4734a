//! Dashboard configuration
//!
//! Holds every tunable number the insight deriver uses: alert thresholds,
//! budget limits per category, and projection scenario factors.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path (`--config`), if given and present
//! 2. Override in data dir (~/.local/share/finboard/config/finboard.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their embedded values. A
//! `[[budgets.limits]]` list in an override replaces the embedded list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/finboard.toml");

/// Thresholds for the alert rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertThresholds {
    /// Warn when expenses / income reaches this ratio
    pub expense_warning_ratio: f64,
    /// Praise when expenses / income stays below this ratio
    pub positive_ratio: f64,
    /// Balance that counts as a healthy cushion (None disables the rule)
    pub cushion_balance: Option<f64>,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            expense_warning_ratio: 0.90,
            positive_ratio: 0.50,
            cushion_balance: Some(1000.0),
        }
    }
}

/// A configured monthly limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Budget limits and status bands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetConfig {
    /// Limit for categories without an explicit entry
    pub default_limit: f64,
    /// Utilization percentage at which a budget turns `warning`
    pub warning_percent: f64,
    /// Utilization percentage at which a budget turns `exceeded`
    pub exceeded_percent: f64,
    /// Explicit limits, in display order
    pub limits: Vec<BudgetLimit>,
}

impl BudgetConfig {
    /// Find the configured limit for a category
    pub fn limit_for(&self, category: &str) -> Option<&BudgetLimit> {
        self.limits.iter().find(|l| l.category == category)
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            default_limit: 500.0,
            warning_percent: 70.0,
            exceeded_percent: 90.0,
            limits: vec![],
        }
    }
}

/// Scenario multipliers applied to the remaining daily expense rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionFactors {
    pub optimistic: f64,
    pub pessimistic: f64,
}

impl Default for ProjectionFactors {
    fn default() -> Self {
        Self {
            optimistic: 0.8,
            pessimistic: 1.2,
        }
    }
}

/// Presentation settings shared by alert messages and the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl DisplayConfig {
    /// Format an amount as "1234.50 €"
    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.currency_symbol)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
        }
    }
}

/// Full dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Base URL of the financial API
    pub api_base_url: String,
    pub display: DisplayConfig,
    pub alerts: AlertThresholds,
    pub budgets: BudgetConfig,
    pub projection: ProjectionFactors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3000".to_string(),
            display: DisplayConfig::default(),
            alerts: AlertThresholds::default(),
            budgets: BudgetConfig::default(),
            projection: ProjectionFactors::default(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigOrigin::Embedded => write!(f, "built-in defaults"),
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// Load configuration (explicit path, then data-dir override, then embedded)
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigOrigin)> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        if let Some(path) = candidate {
            if path.exists() {
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let config = Self::from_toml(&content)?;
                tracing::debug!(path = %path.display(), "Loaded config override");
                return Ok((config, ConfigOrigin::File(path)));
            }
            if explicit.is_some() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        Ok((Self::embedded()?, ConfigOrigin::Embedded))
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        let config = parse_config(DEFAULT_CONFIG, Config::default())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, overlaying it on the embedded configuration
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = parse_config(content, Self::embedded()?)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the deriver cannot work with
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("alerts.expense_warning_ratio", self.alerts.expense_warning_ratio),
            ("alerts.positive_ratio", self.alerts.positive_ratio),
            ("budgets.default_limit", self.budgets.default_limit),
            ("budgets.warning_percent", self.budgets.warning_percent),
            ("budgets.exceeded_percent", self.budgets.exceeded_percent),
            ("projection.optimistic_factor", self.projection.optimistic),
            ("projection.pessimistic_factor", self.projection.pessimistic),
        ];
        for (key, value) in numbers {
            if !value.is_finite() {
                return Err(Error::Config(format!("{} must be a finite number", key)));
            }
        }
        if let Some(cushion) = self.alerts.cushion_balance {
            if !cushion.is_finite() {
                return Err(Error::Config(
                    "alerts.cushion_balance must be a finite number".into(),
                ));
            }
        }
        if self.projection.optimistic <= 0.0 || self.projection.pessimistic <= 0.0 {
            return Err(Error::Config("projection factors must be positive".into()));
        }
        if self.projection.optimistic > 1.0 || self.projection.pessimistic < 1.0 {
            return Err(Error::Config(
                "projection factors need optimistic_factor <= 1.0 <= pessimistic_factor".into(),
            ));
        }
        if self.budgets.warning_percent > self.budgets.exceeded_percent {
            return Err(Error::Config(
                "budgets.warning_percent must not exceed budgets.exceeded_percent".into(),
            ));
        }
        for limit in &self.budgets.limits {
            if limit.category.trim().is_empty() {
                return Err(Error::Config("budget limit with empty category".into()));
            }
            if !limit.limit.is_finite() {
                return Err(Error::Config(format!(
                    "budget limit for {} must be a finite number",
                    limit.category
                )));
            }
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finboard").join("config").join("finboard.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    api: Option<RawApi>,
    display: Option<RawDisplay>,
    alerts: Option<RawAlerts>,
    budgets: Option<RawBudgets>,
    projection: Option<RawProjection>,
}

#[derive(Debug, Deserialize)]
struct RawApi {
    base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    expense_warning_ratio: Option<f64>,
    positive_ratio: Option<f64>,
    cushion_balance: Option<f64>,
    /// Explicit opt-out of the cushion rule
    disable_cushion: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawBudgets {
    default_limit: Option<f64>,
    warning_percent: Option<f64>,
    exceeded_percent: Option<f64>,
    limits: Option<Vec<BudgetLimit>>,
}

#[derive(Debug, Deserialize)]
struct RawProjection {
    optimistic_factor: Option<f64>,
    pessimistic_factor: Option<f64>,
}

/// Parse TOML content and overlay the keys it sets on `base`
fn parse_config(content: &str, mut config: Config) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(api) = raw.api {
        if let Some(url) = api.base_url {
            config.api_base_url = url;
        }
    }

    if let Some(display) = raw.display {
        if let Some(symbol) = display.currency_symbol {
            config.display.currency_symbol = symbol;
        }
    }

    if let Some(alerts) = raw.alerts {
        if let Some(ratio) = alerts.expense_warning_ratio {
            config.alerts.expense_warning_ratio = ratio;
        }
        if let Some(ratio) = alerts.positive_ratio {
            config.alerts.positive_ratio = ratio;
        }
        if let Some(cushion) = alerts.cushion_balance {
            config.alerts.cushion_balance = Some(cushion);
        }
        if alerts.disable_cushion == Some(true) {
            config.alerts.cushion_balance = None;
        }
    }

    if let Some(budgets) = raw.budgets {
        if let Some(limit) = budgets.default_limit {
            config.budgets.default_limit = limit;
        }
        if let Some(percent) = budgets.warning_percent {
            config.budgets.warning_percent = percent;
        }
        if let Some(percent) = budgets.exceeded_percent {
            config.budgets.exceeded_percent = percent;
        }
        if let Some(limits) = budgets.limits {
            config.budgets.limits = limits;
        }
    }

    if let Some(projection) = raw.projection {
        if let Some(factor) = projection.optimistic_factor {
            config.projection.optimistic = factor;
        }
        if let Some(factor) = projection.pessimistic_factor {
            config.projection.pessimistic = factor;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::compute_utilization;
    use crate::models::{BudgetStatus, CategoryExpense};
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = Config::embedded().unwrap();
        assert_eq!(config.alerts.expense_warning_ratio, 0.90);
        assert_eq!(config.budgets.default_limit, 500.0);
        assert_eq!(config.budgets.limits.len(), 5);
        assert_eq!(config.budgets.limits[0].category, "Alimentación");
        assert_eq!(config.budgets.limits[0].icon.as_deref(), Some("🍔"));
        assert_eq!(config.display.currency_symbol, "€");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [alerts]
            expense_warning_ratio = 0.70
            "#,
        )
        .unwrap();

        assert_eq!(config.alerts.expense_warning_ratio, 0.70);
        assert_eq!(config.alerts.positive_ratio, 0.50);
        assert_eq!(config.projection, ProjectionFactors::default());
        assert_eq!(config.budgets.limits.len(), 5);
        let food = config.budgets.limit_for("Alimentación").unwrap();
        assert_eq!(food.limit, 1000.0);
        assert_eq!(config.display.currency_symbol, "€");
    }

    #[test]
    fn test_partial_override_keeps_embedded_budget_limits() {
        let config = Config::from_toml("[alerts]\nexpense_warning_ratio = 0.70").unwrap();
        let categories = vec![CategoryExpense::new("Alimentación", 850.0, 100.0)];

        let budgets = compute_utilization(&categories, &config.budgets);
        assert_eq!(budgets[0].limit, 1000.0);
        assert_eq!(budgets[0].status, BudgetStatus::Warning);
    }

    #[test]
    fn test_override_limits_replace_embedded_list() {
        let config = Config::from_toml(
            r#"
            [[budgets.limits]]
            category = "Rent"
            limit = 1200.0
            "#,
        )
        .unwrap();
        assert_eq!(config.budgets.limits.len(), 1);
        assert!(config.budgets.limit_for("Alimentación").is_none());
    }

    #[test]
    fn test_disable_cushion() {
        let config = Config::from_toml(
            r#"
            [alerts]
            disable_cushion = true
            "#,
        )
        .unwrap();
        assert_eq!(config.alerts.cushion_balance, None);
    }

    #[test]
    fn test_rejects_inverted_budget_bands() {
        let err = Config::from_toml(
            r#"
            [budgets]
            warning_percent = 95.0
            exceeded_percent = 80.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("warning_percent"));
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let result = Config::from_toml(
            r#"
            [projection]
            pessimistic_factor = 0.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_inverted_projection_factors() {
        let err = Config::from_toml(
            r#"
            [projection]
            optimistic_factor = 1.5
            pessimistic_factor = 0.5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("optimistic_factor"));

        let config = Config::from_toml(
            r#"
            [projection]
            optimistic_factor = 1.0
            pessimistic_factor = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.projection.optimistic, 1.0);
        assert_eq!(config.projection.pessimistic, 1.0);
    }

    #[test]
    fn test_rejects_invalid_toml() {
        let err = Config::from_toml("[alerts\nexpense_warning_ratio = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [display]
            currency_symbol = "$"

            [[budgets.limits]]
            category = "Rent"
            limit = 1200.0
            "#
        )
        .unwrap();

        let (config, origin) = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.budgets.limit_for("Rent").unwrap().limit, 1200.0);
        assert_eq!(origin, ConfigOrigin::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_money_format() {
        let display = DisplayConfig::default();
        assert_eq!(display.money(850.0), "850.00 €");
        assert_eq!(display.money(1730.254), "1730.25 €");
    }
}
