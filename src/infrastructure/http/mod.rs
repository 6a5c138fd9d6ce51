//! HTTP driver for the interview pipeline (axum)

pub mod error;
pub mod handlers;
pub mod server;
pub mod types;

pub use error::{ApiError, ErrorBody};
pub use server::{build_router, serve, spawn_session_sweeper, SESSION_SWEEP_INTERVAL};

use std::time::Duration;

use crate::application::Interviewer;
use crate::services::SessionStore;

/// Shared state for all routes
pub struct AppState {
    /// Bank, services and controller
    pub interviewer: Interviewer,
    /// Server-side sessions for the `/sessions` routes
    pub sessions: SessionStore,
}

impl AppState {
    /// Sessions share the controller's clock and the configured retention
    pub fn new(interviewer: Interviewer) -> Self {
        let controller = &interviewer.controller;
        let retention_secs = controller.settings().session_retention_secs;
        let retention = chrono::Duration::from_std(Duration::from_secs(retention_secs))
            .unwrap_or(chrono::Duration::MAX);
        let sessions = SessionStore::with_retention(controller.clock(), retention);
        Self {
            interviewer,
            sessions,
        }
    }
}
