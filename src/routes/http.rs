// GET handlers: version, api/view; POST handler: api/stats

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::atomic::Ordering;

use super::AppState;
use crate::models::RawSnapshot;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/view — returns the current accumulated view-model.
pub(super) async fn view_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.reconciler.lock() {
        Ok(reconciler) => axum::Json(reconciler.view().clone()).into_response(),
        Err(e) => {
            tracing::error!(error = %e, operation = "get_view", "reconciler lock poisoned");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /api/stats — accepts one raw snapshot from the stats provider.
/// A malformed payload is rejected with 400 and leaves the view-model
/// untouched.
pub(super) async fn ingest_handler(
    State(state): State<AppState>,
    body: String,
) -> impl IntoResponse {
    let snapshot = match RawSnapshot::from_json(&body) {
        Ok(s) => s,
        Err(e) => {
            state.snapshots_rejected.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(error = %e, operation = "ingest_snapshot", "rejected snapshot");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    match super::apply_snapshot(&state, snapshot) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(error = %e, operation = "ingest_snapshot", "reconcile failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
