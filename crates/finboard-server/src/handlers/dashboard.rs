//! Derived dashboard handler

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use finboard_core::{derive_dashboard, load_snapshot, Dashboard};

use crate::{AppError, AppState};

/// Query parameters for the dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Projection date (YYYY-MM-DD), defaults to today
    pub date: Option<NaiveDate>,
}

/// GET /api/dashboard - Alerts, budgets and projection derived server-side
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<Dashboard>, AppError> {
    let Query(params) = query.map_err(|e| {
        debug!(error = %e, "Rejected dashboard query");
        AppError::bad_request("Invalid date, expected YYYY-MM-DD")
    })?;

    let snapshot = load_snapshot(state.source.as_ref())
        .await
        .map_err(AppError::ledger)?;

    let today = params.date.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(derive_dashboard(&snapshot, &state.config, today)))
}
