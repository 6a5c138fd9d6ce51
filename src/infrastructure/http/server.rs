use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::handlers;
use super::AppState;
use crate::domain::models::config::ServerConfig;

/// How often the background task evicts expired sessions
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Build the router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/questions", get(handlers::questions))
        .route("/evaluate", post(handlers::evaluate))
        .route("/summary", post(handlers::summary))
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/{id}", get(handlers::get_session))
        .route("/sessions/{id}/question", get(handlers::current_question))
        .route("/sessions/{id}/answers", post(handlers::submit_answer))
        .route("/sessions/{id}/report", get(handlers::report))
        .route("/sessions/{id}/feedback", post(handlers::submit_feedback))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Start the server and run until Ctrl-C.
pub async fn serve(state: Arc<AppState>, config: &ServerConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    let sweeper = spawn_session_sweeper(Arc::clone(&state), SESSION_SWEEP_INTERVAL);
    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "interviewer HTTP server listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error");
    sweeper.abort();
    served?;

    info!("interviewer HTTP server stopped");
    Ok(())
}

/// Evict expired sessions every `every` until aborted.
pub fn spawn_session_sweeper(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = state.sessions.evict_expired().await;
            debug!(evicted, "session sweep finished");
        }
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
