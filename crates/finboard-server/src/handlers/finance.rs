//! Summary and category breakdown handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use finboard_core::models::{CategoryExpense, FinancialSummary};
use finboard_core::{breakdown, summarize};

use crate::{AppError, AppState};

/// GET /api/financial-summary - Total income, expenses and balance
pub async fn financial_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinancialSummary>, AppError> {
    let (income, expenses) = state.source.entries().await.map_err(AppError::ledger)?;

    let summary = summarize(&income, &expenses);
    debug!(
        income = summary.total_income,
        expenses = summary.total_expenses,
        "Computed financial summary"
    );
    Ok(Json(summary))
}

/// GET /api/expenses-by-category - Expense totals and shares per category
pub async fn expenses_by_category(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryExpense>>, AppError> {
    let expenses = state
        .source
        .expense_entries()
        .await
        .map_err(AppError::ledger)?;

    let categories = breakdown(&expenses);
    debug!(count = categories.len(), "Computed category breakdown");
    Ok(Json(categories))
}
