//! In-memory session registry for the HTTP driver.
//!
//! Each session sits behind its own async mutex, so operations on one
//! candidate's interview are serialized while different candidates proceed
//! independently. Finished sessions stay readable for a retention window and
//! are then evicted, as are sessions left running past their deadline.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::errors::{DomainResult, InterviewError};
use crate::domain::models::{SessionPhase, SessionState};
use crate::domain::ports::{Clock, SystemClock};

/// One session behind its own lock
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Live sessions keyed by id
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Retention used by [`SessionStore::new`]
    pub const DEFAULT_RETENTION_SECS: i64 = 60 * 60;

    /// Store on the system clock with the default retention
    pub fn new() -> Self {
        Self::with_retention(
            Arc::new(SystemClock),
            Duration::seconds(Self::DEFAULT_RETENTION_SECS),
        )
    }

    /// Store whose sessions expire `retention` after completion or deadline
    pub fn with_retention(clock: Arc<dyn Clock>, retention: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
            retention,
        }
    }

    /// Register a fresh `not_started` session and return its handle.
    ///
    /// Expired sessions are swept first.
    pub async fn create(&self) -> (Uuid, SharedSession) {
        self.evict_expired().await;

        let state = SessionState::new();
        let id = state.id();
        let shared = Arc::new(Mutex::new(state));
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        debug!(session_id = %id, "session created");
        (id, shared)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<SharedSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(InterviewError::SessionNotFound(id))
    }

    pub async fn remove(&self, id: Uuid) -> DomainResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| debug!(session_id = %id, "session removed"))
            .ok_or(InterviewError::SessionNotFound(id))
    }

    /// Drop sessions whose retention window has passed.
    ///
    /// A session currently locked by a request is left for the next sweep.
    pub async fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, session| {
            let Ok(state) = session.try_lock() else {
                return true;
            };
            let expired = expires_at(&state, self.retention).is_some_and(|at| at <= now);
            if expired {
                debug!(session_id = %id, phase = %state.phase(), "session expired");
            }
            !expired
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "expired sessions evicted");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn expires_at(state: &SessionState, retention: Duration) -> Option<DateTime<Utc>> {
    let anchor = match state.phase() {
        SessionPhase::Completed => state.completed_at(),
        SessionPhase::InProgress => state.deadline(),
        SessionPhase::NotStarted => None,
    }?;
    anchor.checked_add_signed(retention)
}
