//! System endpoints: health check and storage configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, StorageInfoResponse};
use crate::app_state::AppState;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/storage` — Backing store configuration.
#[utoipa::path(
    get,
    path = "/config/storage",
    tag = "System",
    summary = "Storage configuration",
    description = "Reports the active backing store, the collection key prefix, and the message size limit.",
    responses(
        (status = 200, description = "Storage configuration", body = StorageInfoResponse),
    )
)]
pub async fn storage_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.message_service;
    Json(StorageInfoResponse {
        backend: service.store().name().to_string(),
        durable: service.store().is_durable(),
        key_prefix: service.key_prefix().to_string(),
        max_message_bytes: service.max_message_bytes(),
    })
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/storage", get(storage_handler))
}
