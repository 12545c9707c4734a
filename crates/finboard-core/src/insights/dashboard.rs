//! Dashboard composition - runs every deriver over one snapshot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{
    Alert, BudgetUtilization, CategoryExpense, DataSource, FinancialSummary, Projection, Snapshot,
};

use super::{compute_utilization, derive_alerts, project_month_end};

/// Everything the renderer needs for one refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Live data or the sample fallback
    pub source: DataSource,
    /// Date the projection was computed for
    pub as_of: NaiveDate,
    pub summary: FinancialSummary,
    pub categories: Vec<CategoryExpense>,
    pub alerts: Vec<Alert>,
    pub budgets: Vec<BudgetUtilization>,
    pub projection: Projection,
}

/// Derive the full dashboard for `snapshot` as of `today`
pub fn derive_dashboard(snapshot: &Snapshot, config: &Config, today: NaiveDate) -> Dashboard {
    let alerts = derive_alerts(
        &snapshot.summary,
        &snapshot.categories,
        &config.alerts,
        &config.display,
    );
    let budgets = compute_utilization(&snapshot.categories, &config.budgets);
    let projection = project_month_end(&snapshot.summary, today, &config.projection);

    Dashboard {
        source: snapshot.source.clone(),
        as_of: today,
        summary: snapshot.summary,
        categories: snapshot.categories.clone(),
        alerts,
        budgets,
        projection,
    }
}
