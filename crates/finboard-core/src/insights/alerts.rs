//! Alert Deriver
//!
//! Turns the summary and category breakdown into a short ordered list of
//! alerts. Every rule is checked independently; the output order is the rule
//! order below.
//!
//! 1. Negative balance (danger)
//! 2. Expenses at or above the warning share of income (warning)
//! 3. Otherwise, expenses below the positive share of income (positive)
//! 4. Balance at or above the cushion (positive)
//! 5. Nothing recorded yet (info)
//! 6. Largest category in the breakdown (info)
//! 7. Fallback "all good" when nothing else fired (info)

use crate::config::{AlertThresholds, DisplayConfig};
use crate::models::{Alert, AlertKind, CategoryExpense, FinancialSummary};

/// Derive alerts for one refresh
pub fn derive_alerts(
    summary: &FinancialSummary,
    categories: &[CategoryExpense],
    thresholds: &AlertThresholds,
    display: &DisplayConfig,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let balance = summary.available_balance;

    if balance < 0.0 {
        alerts.push(Alert::new(
            AlertKind::Danger,
            "🚨",
            format!(
                "Your balance is negative by {}. Review your expenses urgently.",
                display.money(balance.abs())
            ),
        ));
    }

    // Zero income makes both ratio rules inapplicable
    if let Some(ratio) = summary.expense_ratio() {
        let percent = (ratio * 100.0).round();
        if ratio >= thresholds.expense_warning_ratio {
            alerts.push(Alert::new(
                AlertKind::Warning,
                "⚠️",
                format!(
                    "You are spending {:.0}% of your income. Consider cutting non-essential expenses.",
                    percent
                ),
            ));
        } else if ratio < thresholds.positive_ratio {
            alerts.push(Alert::new(
                AlertKind::Positive,
                "✅",
                format!(
                    "Good job! Your expenses are {:.0}% of your income.",
                    percent
                ),
            ));
        }
    }

    if let Some(cushion) = thresholds.cushion_balance {
        if balance >= cushion {
            alerts.push(Alert::new(
                AlertKind::Positive,
                "💰",
                format!(
                    "Excellent! You have a healthy cushion of {}.",
                    display.money(balance)
                ),
            ));
        }
    }

    if summary.total_income == 0.0 && summary.total_expenses == 0.0 {
        alerts.push(Alert::new(
            AlertKind::Info,
            "👋",
            "No income or expenses recorded yet. Add your first entries to get started.",
        ));
    }

    if let Some(top) = largest_category(categories) {
        alerts.push(Alert::new(
            AlertKind::Info,
            "📊",
            format!(
                "Your largest expense is {}: {}",
                top.category,
                display.money(top.amount)
            ),
        ));
    }

    if alerts.is_empty() {
        alerts.push(Alert::new(
            AlertKind::Info,
            "👍",
            "All good! Your finances look stable.",
        ));
    }

    tracing::debug!(count = alerts.len(), "Derived alerts");
    alerts
}

/// Category with the largest positive amount; ties keep the first seen
pub fn largest_category(categories: &[CategoryExpense]) -> Option<&CategoryExpense> {
    categories
        .iter()
        .filter(|c| c.amount > 0.0)
        .fold(None, |best: Option<&CategoryExpense>, c| match best {
            Some(b) if b.amount >= c.amount => Some(b),
            _ => Some(c),
        })
}
