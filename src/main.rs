use anyhow::Result;
use deskstats::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let (view_tx, _) =
        broadcast::channel::<models::ViewModel>(app_config.publishing.broadcast_capacity);

    let reconciler = Arc::new(std::sync::Mutex::new(reconciler::Reconciler::new(
        app_config.widget.main_battery.clone(),
    )));
    let ws_view_connections = Arc::new(AtomicUsize::new(0));
    let snapshots_accepted = Arc::new(AtomicU64::new(0));
    let snapshots_rejected = Arc::new(AtomicU64::new(0));

    spawn_stats_logger(
        app_config.monitoring.stats_log_interval_secs,
        ws_view_connections.clone(),
        snapshots_accepted.clone(),
        snapshots_rejected.clone(),
    );

    let app = routes::app(
        reconciler,
        view_tx,
        ws_view_connections,
        snapshots_accepted,
        snapshots_rejected,
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    Ok(())
}

/// Periodic INFO log of app stats (view clients, snapshots accepted and
/// rejected); runs until the process exits.
fn spawn_stats_logger(
    interval_secs: u64,
    ws_view_connections: Arc<AtomicUsize>,
    snapshots_accepted: Arc<AtomicU64>,
    snapshots_rejected: Arc<AtomicU64>,
) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            tracing::info!(
                ws_view_clients = ws_view_connections.load(Ordering::Relaxed),
                snapshots_accepted = snapshots_accepted.load(Ordering::Relaxed),
                snapshots_rejected = snapshots_rejected.load(Ordering::Relaxed),
                "app stats"
            );
        }
    });
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
