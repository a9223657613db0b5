// Integration tests: HTTP and WebSocket endpoints

use axum_test::TestServer;
use deskstats::models::ViewModel;
use deskstats::reconciler::Reconciler;
use deskstats::routes;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize};
use tokio::sync::broadcast;

const MEMORY_SNAPSHOT: &str = r#"{
    "memory": {"total": 1024, "used": 512, "free": 512},
    "net": [{"name": "wlan0", "downSpeed": 100.0}, {"name": "eth0", "upSpeed": 50.0}],
    "lastUpdate": {"memory": 1}
}"#;

fn test_app() -> (axum::Router, broadcast::Sender<ViewModel>) {
    let (tx, _) = broadcast::channel(10);
    let reconciler = Arc::new(std::sync::Mutex::new(Reconciler::new(vec![
        "BAT0".into(),
        "BAT1".into(),
    ])));
    let app = routes::app(
        reconciler,
        tx.clone(),
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicU64::new(0)),
        Arc::new(AtomicU64::new(0)),
    );
    (app, tx)
}

/// Build TestServer with http_transport (required for WebSocket tests).
fn test_server_with_http() -> TestServer {
    let (app, _) = test_app();
    TestServer::builder().http_transport().build(app)
}

#[tokio::test]
async fn test_root_endpoint() {
    let (app, _) = test_app();
    let server = TestServer::new(app);
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("deskstats: wallpaper telemetry backend");
}

#[tokio::test]
async fn test_version_endpoint() {
    let (app, _) = test_app();
    let server = TestServer::new(app);
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("deskstats"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_view_starts_empty() {
    let (app, _) = test_app();
    let server = TestServer::new(app);
    let response = server.get("/api/view").await;
    response.assert_status_ok();
    let view: ViewModel = response.json();
    assert!(view.memory.is_none());
    assert!(view.disks.is_empty());
}

#[tokio::test]
async fn test_ingest_then_view_reflects_derivations() {
    let (app, _) = test_app();
    let server = TestServer::new(app);

    let response = server.post("/api/stats").text(MEMORY_SNAPSHOT).await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let view: ViewModel = server.get("/api/view").await.json();
    assert_eq!(view.memory.as_ref().unwrap().percent_used, Some(50));
    assert_eq!(view.net_total.down_speed, 100.0);
    assert_eq!(view.net_total.up_speed, 50.0);
}

#[tokio::test]
async fn test_ingest_rejects_malformed_snapshot() {
    let (app, _) = test_app();
    let server = TestServer::new(app);

    let response = server.post("/api/stats").text("{not json").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    // The bad payload left the view untouched.
    let view: ViewModel = server.get("/api/view").await.json();
    assert!(view.memory.is_none());
}

// --- WebSocket message tests (require http_transport + ws feature) ---
// Receive until the condition holds (the server may send Ping frames and a
// welcome view first).

async fn receive_view_until(
    ws: &mut axum_test::TestWebSocket,
    predicate: impl Fn(&ViewModel) -> bool,
) -> ViewModel {
    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(3);
    loop {
        let text = ws.receive_text().await;
        if let Ok(view) = serde_json::from_str::<ViewModel>(&text) {
            if predicate(&view) {
                return view;
            }
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for matching view-model"
        );
    }
}

#[tokio::test]
async fn test_ws_view_sends_current_view_on_connect() {
    let server = test_server_with_http();
    let mut ws = server.get_websocket("/ws/view").await.into_websocket().await;
    let view = receive_view_until(&mut ws, |_| true).await;
    assert!(view.memory.is_none());
}

#[tokio::test]
async fn test_ws_view_receives_update_after_ingest() {
    let server = test_server_with_http();
    let mut ws = server.get_websocket("/ws/view").await.into_websocket().await;

    let response = server.post("/api/stats").text(MEMORY_SNAPSHOT).await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let view = receive_view_until(&mut ws, |v| v.memory.is_some()).await;
    assert_eq!(view.memory.as_ref().unwrap().percent_used, Some(50));
}

#[tokio::test]
async fn test_ws_ingest_feeds_view_stream() {
    let server = test_server_with_http();
    let mut view_ws = server.get_websocket("/ws/view").await.into_websocket().await;
    let mut ingest_ws = server
        .get_websocket("/ws/ingest")
        .await
        .into_websocket()
        .await;

    ingest_ws.send_text(MEMORY_SNAPSHOT).await;

    let view = receive_view_until(&mut view_ws, |v| v.memory.is_some()).await;
    assert_eq!(view.memory.as_ref().unwrap().percent_used, Some(50));
    assert_eq!(view.net_total.down_speed, 100.0);
}

#[tokio::test]
async fn test_ws_ingest_skips_malformed_frames() {
    let server = test_server_with_http();
    let mut view_ws = server.get_websocket("/ws/view").await.into_websocket().await;
    let mut ingest_ws = server
        .get_websocket("/ws/ingest")
        .await
        .into_websocket()
        .await;

    // A bad frame must not tear down the stream; the next good frame lands.
    ingest_ws.send_text("{not json").await;
    ingest_ws.send_text(MEMORY_SNAPSHOT).await;

    let view = receive_view_until(&mut view_ws, |v| v.memory.is_some()).await;
    assert_eq!(view.memory.as_ref().unwrap().percent_used, Some(50));
}
