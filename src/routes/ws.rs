// WebSocket handlers and stream logic

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::{RawSnapshot, ViewModel};

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Decrements ws_view connection count on drop (connect = +1, drop = -1).
struct WsViewGuard(Arc<AtomicUsize>);

impl Drop for WsViewGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// WS /ws/ingest — the stats provider's persistent channel: one JSON
/// RawSnapshot per text frame.
pub(super) async fn ws_ingest(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_ingest(socket, state).await {
            tracing::info!("Ingest stream error: {}", e);
        }
    })
}

async fn stream_ingest(mut socket: WebSocket, state: AppState) -> anyhow::Result<()> {
    tracing::info!("Stats provider connected to ingest stream");
    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match RawSnapshot::from_json(&text) {
                            Ok(snapshot) => {
                                super::apply_snapshot(&state, snapshot)?;
                            }
                            Err(e) => {
                                // A bad frame never tears down the stream or
                                // the accumulated view.
                                state.snapshots_rejected.fetch_add(1, Ordering::Relaxed);
                                tracing::warn!(error = %e, operation = "ingest_snapshot", "rejected snapshot frame");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::info!("Ingest stream closed: {}", e);
                        break;
                    }
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// WS /ws/view — presentation clients: current view-model on connect, then
/// one message per accepted snapshot.
pub(super) async fn ws_view(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let tx = state.view_tx.clone();
    let conn_count = state.ws_view_connections.clone();
    ws.on_upgrade(move |socket| async move {
        let mut rx = tx.subscribe();
        if let Err(e) = stream_view(socket, &mut rx, conn_count, state).await {
            tracing::info!("View stream error: {}", e);
        }
    })
}

async fn stream_view(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<ViewModel>,
    conn_count: Arc<AtomicUsize>,
    state: AppState,
) -> anyhow::Result<()> {
    conn_count.fetch_add(1, Ordering::Relaxed);
    let _guard = WsViewGuard(conn_count);
    tracing::info!("Client connected to view stream");

    let current = {
        let reconciler = state
            .reconciler
            .lock()
            .map_err(|e| anyhow::anyhow!("reconciler lock poisoned: {}", e))?;
        reconciler.view().clone()
    };
    let welcome_json = serde_json::to_string(&current)?;
    let r = timeout(
        WS_SEND_TIMEOUT,
        socket.send(Message::Text(welcome_json.into())),
    )
    .await;
    if r.is_err() || r.unwrap_or(Ok(())).is_err() {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(view) => {
                        let json = serde_json::to_string(&view)?;
                        let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
                        if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/view client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
