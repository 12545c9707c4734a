//! Server API tests

use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use finboard_core::{ApiClient, Error, LedgerEntry, StaticSource};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn sample_ledger() -> StaticSource {
    StaticSource::new(
        vec![
            LedgerEntry::new(Some("Salario"), 2500.0),
            LedgerEntry::new(None, 350.75),
        ],
        vec![
            LedgerEntry::new(Some("Alimentación"), 300.0),
            LedgerEntry::new(Some("Transporte"), 100.0),
            LedgerEntry::new(Some("Alimentación"), 200.0),
            LedgerEntry::new(None, 25.0),
        ],
    )
}

/// Ledger whose upstream is always down
struct BrokenSource;

#[async_trait]
impl LedgerSource for BrokenSource {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn income_entries(&self) -> finboard_core::Result<Vec<LedgerEntry>> {
        Err(Error::Upstream("connection refused".into()))
    }

    async fn expense_entries(&self) -> finboard_core::Result<Vec<LedgerEntry>> {
        Err(Error::Upstream("connection refused".into()))
    }
}

fn setup_test_app() -> Router {
    create_router(
        Arc::new(sample_ledger()),
        Config::embedded().unwrap(),
        ServerConfig::default(),
    )
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Finance API Tests ==========

#[tokio::test]
async fn test_root_status() {
    let response = get(setup_test_app(), "/api").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "online");
    assert_eq!(json["source"], "static");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_financial_summary() {
    let response = get(setup_test_app(), "/api/financial-summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 2850.75);
    assert_eq!(json["total_expenses"], 625.0);
    assert_eq!(json["available_balance"], 2225.75);
}

#[tokio::test]
async fn test_financial_summary_from_csv_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    std::fs::write(
        &path,
        "kind,category,amount\nincome,Salario,1200\nexpense,Transporte,200.5\n",
    )
    .unwrap();

    let app = create_router(
        Arc::new(finboard_core::CsvLedger::open(&path).unwrap()),
        Config::embedded().unwrap(),
        ServerConfig::default(),
    );
    let response = get(app, "/api/financial-summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 1200.0);
    assert_eq!(json["total_expenses"], 200.5);
    assert_eq!(json["available_balance"], 999.5);
}

#[tokio::test]
async fn test_expenses_by_category() {
    let response = get(setup_test_app(), "/api/expenses-by-category").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["category"], "Alimentación");
    assert_eq!(rows[0]["amount"], 500.0);
    assert_eq!(rows[0]["percentage"], 80.0);
    assert_eq!(rows[2]["category"], finboard_core::sources::UNCATEGORIZED);
}

#[tokio::test]
async fn test_empty_ledger() {
    let app = create_router(
        Arc::new(StaticSource::default()),
        Config::embedded().unwrap(),
        ServerConfig::default(),
    );

    let json = get_body_json(get(app.clone(), "/api/financial-summary").await).await;
    assert_eq!(json["available_balance"], 0.0);

    let json = get_body_json(get(app, "/api/expenses-by-category").await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let app = create_router(
        Arc::new(BrokenSource),
        Config::embedded().unwrap(),
        ServerConfig::default(),
    );

    let response = get(app.clone(), "/api/financial-summary").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = get_body_json(response).await;
    // Cause stays in the log, not in the response
    assert_eq!(json["error"], "Ledger source unavailable");

    let response = get(app.clone(), "/api/expenses-by-category").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // The health check does not touch the ledger
    let response = get(app, "/api").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Dashboard API Tests ==========

#[tokio::test]
async fn test_dashboard_for_date() {
    let response = get(setup_test_app(), "/api/dashboard?date=2024-06-10").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["as_of"], "2024-06-10");
    assert_eq!(json["source"]["mode"], "live");
    assert_eq!(json["projection"]["days_remaining"], 20);
    assert!(!json["alerts"].as_array().unwrap().is_empty());
    assert!(!json["budgets"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_rejects_bad_date() {
    let response = get(setup_test_app(), "/api/dashboard?date=not-a-date").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid date, expected YYYY-MM-DD");
}

#[tokio::test]
async fn test_dashboard_upstream_failure() {
    let app = create_router(
        Arc::new(BrokenSource),
        Config::embedded().unwrap(),
        ServerConfig::default(),
    );
    let response = get(app, "/api/dashboard").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// ========== Middleware Tests ==========

#[tokio::test]
async fn test_security_and_cors_headers() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .uri("/api")
                .header("Origin", "http://localhost:8080")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
}

#[tokio::test]
async fn test_restricted_cors_origin() {
    let app = create_router(
        Arc::new(sample_ledger()),
        Config::embedded().unwrap(),
        ServerConfig {
            allowed_origins: vec!["https://finance.example.com".into()],
            ..Default::default()
        },
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api")
                .header("Origin", "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_static_dir_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>finboard</h1>").unwrap();

    let app = create_router(
        Arc::new(sample_ledger()),
        Config::embedded().unwrap(),
        ServerConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        },
    );

    let response = get(app, "/index.html").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_parse_origins() {
    assert_eq!(
        parse_origins(" https://a.example, ,https://b.example "),
        vec!["https://a.example", "https://b.example"]
    );
    assert!(parse_origins("").is_empty());
}

// ========== Client Round Trip ==========

#[tokio::test]
async fn test_client_consumes_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, setup_test_app()).await.unwrap();
    });

    let client = ApiClient::new(&format!("http://{}", addr));
    assert!(client.health_check().await);

    let snapshot = client.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.summary.available_balance, 2225.75);
    assert_eq!(snapshot.categories.len(), 3);
    assert_eq!(snapshot.categories[1].category, "Transporte");
}
