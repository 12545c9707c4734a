//! Test utilities for finboard-core
//!
//! This module provides mock upstream servers that can be used for
//! development and integration tests:
//! - [`MockApiServer`] - the financial API (`/api/...`)
//! - [`MockNotionServer`] - the Notion database query endpoint

use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::sample::sample_snapshot;

/// What a mock endpoint answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with a JSON body
    Json(Value),
    /// 200 with a raw body labelled as JSON
    Body(String),
    /// Empty response with the given status
    Status(u16),
}

impl MockReply {
    fn respond(self) -> Response {
        match self {
            MockReply::Json(value) => axum::Json(value).into_response(),
            MockReply::Body(body) => {
                ([(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            MockReply::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
        }
    }
}

/// Payloads served by [`MockApiServer`]
#[derive(Debug, Clone)]
pub struct MockApiConfig {
    pub summary: MockReply,
    pub categories: MockReply,
}

impl Default for MockApiConfig {
    /// Serves the built-in sample data
    fn default() -> Self {
        let sample = sample_snapshot("mock");
        Self {
            summary: MockReply::Json(json!(sample.summary)),
            categories: MockReply::Json(json!(sample.categories)),
        }
    }
}

/// Mock financial API server
pub struct MockApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockApiServer {
    /// Start the mock server serving the sample data
    pub async fn start() -> Self {
        Self::start_with(MockApiConfig::default()).await
    }

    /// Start the mock server with custom payloads
    pub async fn start_with(config: MockApiConfig) -> Self {
        let app = Router::new()
            .route("/api", get(handle_root))
            .route(crate::client::SUMMARY_PATH, get(handle_summary))
            .route(crate::client::CATEGORIES_PATH, get(handle_categories))
            .with_state(Arc::new(config));

        let (addr, shutdown_tx) = spawn(app).await;
        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_root() -> Json<Value> {
    Json(json!({"message": "Mock financial API", "status": "online"}))
}

async fn handle_summary(State(config): State<Arc<MockApiConfig>>) -> Response {
    config.summary.clone().respond()
}

async fn handle_categories(State(config): State<Arc<MockApiConfig>>) -> Response {
    config.categories.clone().respond()
}

/// Mock Notion API server
///
/// Holds pages per database id and returns them `page_size` at a time,
/// using the result offset as the cursor.
pub struct MockNotionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

struct NotionState {
    databases: HashMap<String, Vec<Value>>,
    page_size: usize,
}

impl MockNotionServer {
    pub async fn start(databases: HashMap<String, Vec<Value>>, page_size: usize) -> Self {
        let state = Arc::new(NotionState {
            databases,
            page_size: page_size.max(1),
        });
        let app = Router::new()
            .route("/v1/databases/:id/query", post(handle_query))
            .with_state(state);

        let (addr, shutdown_tx) = spawn(app).await;
        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// API root to pass to `NotionSource::with_api_url`
    pub fn url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockNotionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Build a Notion page with the default amount and category properties
pub fn notion_page(amount: f64, category: Option<&str>) -> Value {
    let select = category.map(|name| json!({"name": name}));
    json!({
        "object": "page",
        "properties": {
            "Cantidad": {"type": "number", "number": amount},
            "Categoría": {"type": "select", "select": select},
        }
    })
}

async fn handle_query(
    State(state): State<Arc<NotionState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized || !headers.contains_key("notion-version") {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let Some(pages) = state.databases.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let start = body
        .get("start_cursor")
        .and_then(Value::as_str)
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0)
        .min(pages.len());
    let end = (start + state.page_size).min(pages.len());
    let has_more = end < pages.len();
    let next_cursor = has_more.then(|| end.to_string());

    Json(json!({
        "object": "list",
        "results": &pages[start..end],
        "has_more": has_more,
        "next_cursor": next_cursor,
    }))
    .into_response()
}

async fn spawn(app: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}
