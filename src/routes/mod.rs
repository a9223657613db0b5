// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::models::{RawSnapshot, ViewModel};
use crate::reconciler::Reconciler;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) reconciler: Arc<Mutex<Reconciler>>,
    pub(crate) view_tx: broadcast::Sender<ViewModel>,
    pub(crate) ws_view_connections: Arc<AtomicUsize>,
    pub(crate) snapshots_accepted: Arc<AtomicU64>,
    pub(crate) snapshots_rejected: Arc<AtomicU64>,
}

pub fn app(
    reconciler: Arc<Mutex<Reconciler>>,
    view_tx: broadcast::Sender<ViewModel>,
    ws_view_connections: Arc<AtomicUsize>,
    snapshots_accepted: Arc<AtomicU64>,
    snapshots_rejected: Arc<AtomicU64>,
) -> Router {
    let state = AppState {
        reconciler,
        view_tx,
        ws_view_connections,
        snapshots_accepted,
        snapshots_rejected,
    };
    Router::new()
        .route("/", get(|| async { "deskstats: wallpaper telemetry backend" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/view", get(http::view_handler)) // GET /api/view
        .route("/api/stats", post(http::ingest_handler)) // POST /api/stats
        .route("/ws/ingest", get(ws::ws_ingest)) // WS /ws/ingest
        .route("/ws/view", get(ws::ws_view)) // WS /ws/view
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Runs one full `reconcile` under the state lock, then broadcasts the
/// resulting view-model. Subscribers only ever see complete states.
pub(crate) fn apply_snapshot(
    state: &AppState,
    snapshot: RawSnapshot,
) -> anyhow::Result<ViewModel> {
    let view = {
        let mut reconciler = state
            .reconciler
            .lock()
            .map_err(|e| anyhow::anyhow!("reconciler lock poisoned: {}", e))?;
        reconciler.reconcile(snapshot).clone()
    };
    state.snapshots_accepted.fetch_add(1, Ordering::Relaxed);
    // No receivers just means no /ws/view clients; GET /api/view still
    // serves the accumulated state.
    let _ = state.view_tx.send(view.clone());
    Ok(view)
}
