//! Data models for finboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ========== Upstream Figures ==========

/// Aggregate figures for the active period, as served by `/api/financial-summary`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Expected to equal income - expenses; not enforced
    pub available_balance: f64,
}

impl FinancialSummary {
    /// Build a summary whose balance is income minus expenses
    pub fn new(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            available_balance: total_income - total_expenses,
        }
    }

    /// An all-zero summary (nothing recorded yet)
    pub fn empty() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Share of income spent, or `None` when there is no income to compare against
    pub fn expense_ratio(&self) -> Option<f64> {
        if self.total_income > 0.0 {
            Some(self.total_expenses / self.total_income)
        } else {
            None
        }
    }
}

/// One row of `/api/expenses-by-category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: f64,
    /// Share of total expenses (0-100), informational only
    #[serde(default)]
    pub percentage: f64,
}

impl CategoryExpense {
    pub fn new(category: impl Into<String>, amount: f64, percentage: f64) -> Self {
        Self {
            category: category.into(),
            amount,
            percentage,
        }
    }
}

// ========== Alerts ==========

/// Severity/category tag of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Needs attention now (negative balance)
    Danger,
    /// Spending is close to income
    Warning,
    /// Something is going well
    Positive,
    /// Neutral information
    Info,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Danger => "danger",
            AlertKind::Warning => "warning",
            AlertKind::Positive => "positive",
            AlertKind::Info => "info",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "danger" => Ok(AlertKind::Danger),
            "warning" => Ok(AlertKind::Warning),
            "positive" => Ok(AlertKind::Positive),
            "info" => Ok(AlertKind::Info),
            _ => Err(format!("Unknown alert kind: {}", s)),
        }
    }
}

/// A human-readable alert, recomputed on every refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub icon: String,
}

impl Alert {
    pub fn new(kind: AlertKind, icon: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            icon: icon.into(),
        }
    }
}

// ========== Budgets ==========

/// Utilization band of a category budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "ok",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spend against the configured limit for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUtilization {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    /// Clamped to [0, 100] for progress bars
    pub percentage: f64,
    /// Unclamped spent/limit ratio as a percentage
    pub raw_percentage: f64,
    /// Limit minus spent; negative once over budget
    pub remaining: f64,
    pub status: BudgetStatus,
    pub icon: Option<String>,
}

// ========== Projection ==========

/// Which spending assumption a scenario makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Optimistic,
    Realistic,
    Pessimistic,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Optimistic => "optimistic",
            ScenarioKind::Realistic => "realistic",
            ScenarioKind::Pessimistic => "pessimistic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Optimistic => "Optimistic",
            ScenarioKind::Realistic => "Realistic",
            ScenarioKind::Pessimistic => "Pessimistic",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected end-of-month balance under one spending assumption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// Multiplier applied to the remaining daily expense rate
    pub factor: f64,
    pub projected_balance: f64,
}

/// Reading of the realistic scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outlook {
    /// Realistic projection ends the month at or above zero
    OnTrack,
    /// Realistic projection ends the month below zero by `amount`
    Shortfall { amount: f64 },
    /// Last day of the month: the current balance is the final outcome
    MonthClosed,
}

/// End-of-month extrapolation of the current daily rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub days_in_month: u32,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub daily_expense_rate: f64,
    pub daily_income_rate: f64,
    pub optimistic: Scenario,
    pub realistic: Scenario,
    pub pessimistic: Scenario,
    /// Balance spread over the remaining days (guidance only)
    pub recommended_daily_spend: f64,
    pub outlook: Outlook,
}

impl Projection {
    /// Scenarios in display order
    pub fn scenarios(&self) -> [Scenario; 3] {
        [self.optimistic, self.realistic, self.pessimistic]
    }
}

// ========== Snapshots ==========

/// Where the figures of a snapshot came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DataSource {
    /// Fetched from the financial API
    Live,
    /// Built-in sample figures used because the API was unavailable
    Sample { reason: String },
}

impl DataSource {
    pub fn is_sample(&self) -> bool {
        matches!(self, DataSource::Sample { .. })
    }
}

/// One refresh worth of upstream data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub summary: FinancialSummary,
    pub categories: Vec<CategoryExpense>,
    pub source: DataSource,
}

impl Snapshot {
    pub fn live(summary: FinancialSummary, categories: Vec<CategoryExpense>) -> Self {
        Self {
            summary,
            categories,
            source: DataSource::Live,
        }
    }
}
