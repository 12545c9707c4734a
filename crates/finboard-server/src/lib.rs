//! finboard Web Server
//!
//! Axum-based REST API serving the financial summary and category breakdown
//! that the dashboard consumes, aggregated from a ledger source (Notion or a
//! local CSV file). Also serves the fully derived dashboard as JSON.
//!
//! - Permissive CORS unless an origin list is configured
//! - Request tracing and security headers
//! - Sanitized error responses (`502` when the ledger is unreachable)

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use finboard_core::{Config, LedgerSource};

mod handlers;

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = any origin)
    pub allowed_origins: Vec<String>,
    /// Directory served for paths outside `/api`
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read FINBOARD_ALLOWED_ORIGINS (comma-separated)
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("FINBOARD_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();
        Self {
            allowed_origins,
            static_dir: None,
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub source: Arc<dyn LedgerSource>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(
    source: Arc<dyn LedgerSource>,
    config: Config,
    server_config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState { source, config });

    let api_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/financial-summary", get(handlers::financial_summary))
        .route("/expenses-by-category", get(handlers::expenses_by_category))
        .route("/dashboard", get(handlers::dashboard));

    let cors = if server_config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));

    if let Some(dir) = server_config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve_with_config(
    source: Arc<dyn LedgerSource>,
    config: Config,
    server_config: ServerConfig,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    if server_config.allowed_origins.is_empty() {
        warn!("⚠️  CORS allows any origin (set FINBOARD_ALLOWED_ORIGINS to restrict)");
    }
    info!(source = source.name(), "Serving ledger");

    let app = create_router(source, config, server_config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_gateway(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a ledger failure, keeping the cause for the log
    pub fn ledger(err: finboard_core::Error) -> Self {
        use finboard_core::Error;

        match err {
            Error::Upstream(_) | Error::Unavailable(_) | Error::Http(_) => Self {
                internal: Some(err.into()),
                ..Self::bad_gateway("Ledger source unavailable")
            },
            Error::InvalidData(_) | Error::Csv(_) => Self {
                internal: Some(err.into()),
                ..Self::bad_gateway("Ledger data is invalid")
            },
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, status = %self.status, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
