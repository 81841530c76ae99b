use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{holidays::HolidayCalendar, runtime, storage};

use crate::routes;
use crate::state::ServerState;

const FRONTEND_DIR: &str = "frontend";

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build state from configuration: open the storage backend and load the
/// holiday calendar.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let storage = storage::open(&cfg.storage).await?;
    let holidays = HolidayCalendar::from_config(&cfg.calendar);
    info!(year = holidays.year(), holidays = holidays.holidays().count(), "holiday calendar loaded");
    Ok(ServerState::new(storage, holidays))
}

/// Public entry: load configuration, build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_default()?;

    if let Some(data_dir) = cfg.storage.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        runtime::ensure_env(FRONTEND_DIR, data_dir).await?;
    }

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors(), FRONTEND_DIR);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting vacation tracker server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app, ctrl_c()).await
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained and stopped");
    Ok(())
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => warn!(error = %e, "cannot listen for Ctrl+C; shutting down"),
    }
}
