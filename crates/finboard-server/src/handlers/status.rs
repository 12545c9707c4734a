//! API root handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub status: &'static str,
    /// Ledger backing the figures
    pub source: &'static str,
}

/// GET /api - Health check used by the dashboard client
pub async fn root(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "finboard financial API",
        status: "online",
        source: state.source.name(),
    })
}
