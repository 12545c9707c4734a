//! Upstream ledger sources
//!
//! The financial API is backed by a ledger of individual income and expense
//! entries. A [`LedgerSource`] provides those entries; [`summarize`] and
//! [`breakdown`] aggregate them into the two API payloads.
//!
//! Built-in sources:
//! - [`NotionSource`] - two Notion databases (income, expenses)
//! - [`CsvLedger`] - a local `kind,category,amount` CSV file
//! - [`StaticSource`] - fixed in-memory entries

pub mod ledger;
pub mod notion;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CategoryExpense, FinancialSummary, Snapshot};

pub use ledger::CsvLedger;
pub use notion::NotionSource;

/// Label used for entries without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub category: Option<String>,
    pub amount: f64,
}

impl LedgerEntry {
    pub fn new(category: Option<&str>, amount: f64) -> Self {
        Self {
            category: category.map(str::to_string),
            amount,
        }
    }
}

/// Trait for anything that can list ledger entries
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    /// All income entries for the active period
    async fn income_entries(&self) -> Result<Vec<LedgerEntry>>;

    /// All expense entries for the active period
    async fn expense_entries(&self) -> Result<Vec<LedgerEntry>>;

    /// Income and expense entries taken from the same read of the ledger
    ///
    /// Defaults to fetching both lists concurrently. Sources that hold both
    /// lists in one place override this to read it once.
    async fn entries(&self) -> Result<(Vec<LedgerEntry>, Vec<LedgerEntry>)> {
        tokio::try_join!(self.income_entries(), self.expense_entries())
    }
}

/// Total income, expenses and the resulting balance
pub fn summarize(income: &[LedgerEntry], expenses: &[LedgerEntry]) -> FinancialSummary {
    let total_income: f64 = income.iter().map(|e| e.amount).sum();
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    FinancialSummary::new(total_income, total_expenses)
}

/// Expense totals per category, in first-seen order
///
/// Percentages are shares of the overall total rounded to two decimals, or
/// zero when nothing was spent.
pub fn breakdown(expenses: &[LedgerEntry]) -> Vec<CategoryExpense> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut total = 0.0;

    for entry in expenses {
        let category = entry
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        match totals.iter_mut().find(|(name, _)| name == category) {
            Some((_, amount)) => *amount += entry.amount,
            None => totals.push((category.to_string(), entry.amount)),
        }
        total += entry.amount;
    }

    totals
        .into_iter()
        .map(|(category, amount)| {
            let percentage = if total > 0.0 {
                (amount / total * 100.0 * 100.0).round() / 100.0
            } else {
                0.0
            };
            CategoryExpense::new(category, amount, percentage)
        })
        .collect()
}

/// Read both entry lists and aggregate them into a live snapshot
pub async fn load_snapshot(source: &dyn LedgerSource) -> Result<Snapshot> {
    let (income, expenses) = source.entries().await?;
    tracing::debug!(
        source = source.name(),
        income = income.len(),
        expenses = expenses.len(),
        "Loaded ledger entries"
    );
    Ok(Snapshot::live(
        summarize(&income, &expenses),
        breakdown(&expenses),
    ))
}

/// Fixed in-memory ledger
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub income: Vec<LedgerEntry>,
    pub expenses: Vec<LedgerEntry>,
}

impl StaticSource {
    pub fn new(income: Vec<LedgerEntry>, expenses: Vec<LedgerEntry>) -> Self {
        Self { income, expenses }
    }
}

#[async_trait]
impl LedgerSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn income_entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.income.clone())
    }

    async fn expense_entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.expenses.clone())
    }
}
