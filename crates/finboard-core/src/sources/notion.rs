//! Notion ledger
//!
//! Income and expenses live in two Notion databases. Each page carries a
//! number property with the amount and a select property with the category.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::{LedgerEntry, LedgerSource};

/// Default Notion API root
pub const NOTION_API_URL: &str = "https://api.notion.com/v1";

/// Notion API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default name of the amount property
pub const DEFAULT_AMOUNT_PROPERTY: &str = "Cantidad";

/// Default name of the category property
pub const DEFAULT_CATEGORY_PROPERTY: &str = "Categoría";

#[derive(Debug, Default, Serialize)]
struct QueryRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// Ledger stored in two Notion databases
#[derive(Clone)]
pub struct NotionSource {
    http_client: Client,
    api_url: String,
    token: Option<String>,
    income_db: Option<String>,
    expenses_db: Option<String>,
    amount_property: String,
    category_property: String,
}

impl NotionSource {
    pub fn new(
        token: Option<String>,
        income_db: Option<String>,
        expenses_db: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            http_client: Client::new(),
            api_url: NOTION_API_URL.to_string(),
            token: non_empty(token),
            income_db: non_empty(income_db),
            expenses_db: non_empty(expenses_db),
            amount_property: DEFAULT_AMOUNT_PROPERTY.to_string(),
            category_property: DEFAULT_CATEGORY_PROPERTY.to_string(),
        }
    }

    /// Create from NOTION_TOKEN, NOTION_INCOME_DB and NOTION_EXPENSES_DB
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("NOTION_TOKEN").ok(),
            std::env::var("NOTION_INCOME_DB").ok(),
            std::env::var("NOTION_EXPENSES_DB").ok(),
        )
    }

    /// Point at a different API root (used against mock servers)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the amount and category property names
    pub fn with_properties(mut self, amount: &str, category: &str) -> Self {
        self.amount_property = amount.to_string();
        self.category_property = category.to_string();
        self
    }

    /// Whether a token and both database ids are present
    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.income_db.is_some() && self.expenses_db.is_some()
    }

    async fn query_database(&self, database_id: Option<&str>) -> Result<Vec<LedgerEntry>> {
        let (Some(token), Some(database_id)) = (self.token.as_deref(), database_id) else {
            debug!("Notion not configured, returning no entries");
            return Ok(vec![]);
        };

        let url = format!("{}/databases/{}/query", self.api_url, database_id);
        let mut entries = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = QueryRequest {
                start_cursor: cursor.as_deref(),
            };
            let response = self
                .http_client
                .post(&url)
                .bearer_auth(token)
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| Error::Upstream(format!("Notion request failed: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::Upstream(format!(
                    "Notion query returned {}",
                    status
                )));
            }

            let page: QueryResponse = response
                .json()
                .await
                .map_err(|e| Error::Upstream(format!("Invalid Notion response: {}", e)))?;

            entries.extend(
                page.results
                    .iter()
                    .map(|p| entry_from_page(p, &self.amount_property, &self.category_property)),
            );

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                (true, None) => {
                    warn!("Notion reported more pages without a cursor");
                    break;
                }
                _ => break,
            }
        }

        debug!(database_id, count = entries.len(), "Queried Notion database");
        Ok(entries)
    }
}

/// Read a property as an amount (number) or a label (select)
///
/// Returns `None` for missing properties and unsupported property types.
pub fn property_value(property: Option<&Value>) -> Option<PropertyValue> {
    let property = property?;
    match property.get("type")?.as_str()? {
        "number" => Some(PropertyValue::Number(
            property.get("number").and_then(Value::as_f64).unwrap_or(0.0),
        )),
        "select" => Some(PropertyValue::Select(
            property
                .get("select")
                .and_then(|s| s.get("name"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        )),
        _ => None,
    }
}

/// Value of a supported Notion property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Select(String),
}

/// Build a ledger entry from a Notion page object
pub fn entry_from_page(
    page: &Value,
    amount_property: &str,
    category_property: &str,
) -> LedgerEntry {
    let properties = page.get("properties");
    let lookup = |name: &str| property_value(properties.and_then(|p| p.get(name)));

    let amount = match lookup(amount_property) {
        Some(PropertyValue::Number(n)) if n.is_finite() => n,
        _ => 0.0,
    };
    let category = match lookup(category_property) {
        Some(PropertyValue::Select(name)) if !name.is_empty() => Some(name),
        _ => None,
    };

    LedgerEntry { category, amount }
}

#[async_trait]
impl LedgerSource for NotionSource {
    fn name(&self) -> &'static str {
        "notion"
    }

    async fn income_entries(&self) -> Result<Vec<LedgerEntry>> {
        self.query_database(self.income_db.as_deref()).await
    }

    async fn expense_entries(&self) -> Result<Vec<LedgerEntry>> {
        self.query_database(self.expenses_db.as_deref()).await
    }
}
