//! Financial API client
//!
//! Fetches the two upstream datasets concurrently and hands them to the
//! deriver as a single [`Snapshot`]. Either fetch failing aborts the whole
//! refresh; there is no partial snapshot and no automatic retry.
//!
//! Category labels are repaired (see [`crate::encoding`]) before they leave
//! this module, and malformed category payloads degrade to an empty
//! breakdown instead of failing the refresh.

use reqwest::Client;
use tracing::{debug, warn};

use crate::encoding::repair_mojibake;
use crate::error::{Error, Result};
use crate::models::{CategoryExpense, FinancialSummary, Snapshot};
use crate::sample::sample_snapshot;

/// Path of the summary endpoint
pub const SUMMARY_PATH: &str = "/api/financial-summary";

/// Path of the category breakdown endpoint
pub const CATEGORIES_PATH: &str = "/api/expenses-by-category";

/// HTTP client for the financial API
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from the FINBOARD_API_URL environment variable
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("FINBOARD_API_URL").ok()?;
        Some(Self::new(&url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the API root answers
    pub async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    /// GET /api/financial-summary
    pub async fn fetch_summary(&self) -> Result<FinancialSummary> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, SUMMARY_PATH))
            .send()
            .await?
            .error_for_status()?;

        let summary: FinancialSummary = response.json().await?;
        debug!(
            income = summary.total_income,
            expenses = summary.total_expenses,
            balance = summary.available_balance,
            "Fetched financial summary"
        );
        Ok(summary)
    }

    /// GET /api/expenses-by-category
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryExpense>> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, CATEGORIES_PATH))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let categories = parse_categories(&body);
        debug!(count = categories.len(), "Fetched category breakdown");
        Ok(categories)
    }

    /// Fetch both datasets concurrently; any failure makes the data unavailable
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let (summary, categories) =
            tokio::try_join!(self.fetch_summary(), self.fetch_categories())
                .map_err(|e| Error::Unavailable(e.to_string()))?;

        Ok(Snapshot::live(summary, categories))
    }

    /// Fetch a snapshot, substituting the labelled sample data on failure
    pub async fn fetch_snapshot_or_sample(&self) -> Snapshot {
        match self.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Financial API unavailable, using sample data");
                sample_snapshot(e.to_string())
            }
        }
    }
}

/// Parse a category payload leniently
///
/// A body that is not a JSON array yields an empty breakdown. Items missing
/// fields, with empty labels, or with non-finite amounts are skipped.
pub fn parse_categories(body: &str) -> Vec<CategoryExpense> {
    let items = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            warn!("Category payload is not an array, treating as empty");
            return vec![];
        }
        Err(e) => {
            warn!(error = %e, "Category payload is not valid JSON, treating as empty");
            return vec![];
        }
    };

    let total = items.len();
    let categories: Vec<CategoryExpense> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<CategoryExpense>(item).ok())
        .filter_map(|mut row| {
            let label = repair_mojibake(row.category.trim()).into_owned();
            if label.is_empty() || !row.amount.is_finite() {
                return None;
            }
            row.category = label;
            Some(row)
        })
        .collect();

    if categories.len() < total {
        warn!(
            skipped = total - categories.len(),
            "Skipped malformed category rows"
        );
    }

    categories
}
