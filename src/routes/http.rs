// GET handlers: root, version, /api/system/*

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

use super::AppState;
use crate::collector::Collector;

/// GET / — service banner.
pub(super) async fn root_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "message": "System Monitor API" }))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Runs one collection off the async runtime; the native CPU sample sleeps.
async fn collect<T, F>(state: AppState, f: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&Collector) -> T + Send + 'static,
{
    let collector = state.collector;
    match tokio::task::spawn_blocking(move || f(&collector)).await {
        Ok(value) => axum::Json(value).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "collector task join failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({ "error": format!("collector task join: {}", e) })),
            )
                .into_response()
        }
    }
}

/// GET /api/system/info — full snapshot.
pub(super) async fn system_info_handler(State(state): State<AppState>) -> Response {
    collect(state, Collector::snapshot).await
}

pub(super) async fn cpu_handler(State(state): State<AppState>) -> Response {
    collect(state, Collector::cpu).await
}

pub(super) async fn memory_handler(State(state): State<AppState>) -> Response {
    collect(state, Collector::memory).await
}

/// GET /api/system/disk — `{"disks": [...]}`.
pub(super) async fn disk_handler(State(state): State<AppState>) -> Response {
    collect(state, Collector::disk).await
}

pub(super) async fn network_handler(State(state): State<AppState>) -> Response {
    collect(state, Collector::network).await
}
