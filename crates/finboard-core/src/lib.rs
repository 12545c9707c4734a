//! finboard Core Library
//!
//! Shared functionality for the finboard personal finance dashboard:
//! - Data model for summaries, category breakdowns, budgets and alerts
//! - Insight deriver (alerts, budget utilization, month-end projection)
//! - Layered TOML configuration with tunable thresholds
//! - HTTP client for the financial API with an explicit sample fallback
//! - Upstream ledger sources (Notion, local CSV) and their aggregation
//! - Category palette and mis-decoded UTF-8 repair

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod insights;
pub mod models;
pub mod palette;
pub mod sample;
pub mod sources;

/// Test utilities including a mock financial API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::ApiClient;
pub use config::{
    AlertThresholds, BudgetConfig, BudgetLimit, Config, ConfigOrigin, DisplayConfig,
    ProjectionFactors,
};
pub use error::{Error, Result};
pub use insights::{
    compute_utilization, derive_alerts, derive_dashboard, project_month_end, Dashboard,
};
pub use models::{
    Alert, AlertKind, BudgetStatus, BudgetUtilization, CategoryExpense, DataSource,
    FinancialSummary, Outlook, Projection, Scenario, ScenarioKind, Snapshot,
};
pub use sources::{
    breakdown, load_snapshot, summarize, CsvLedger, LedgerEntry, LedgerSource, NotionSource,
    StaticSource,
};
