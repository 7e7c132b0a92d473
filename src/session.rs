// src/session.rs
//! Per-session transient state (the last generated draft)

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::config_manager::SessionConfig;
use crate::types::OutreachDraft;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub draft: Option<OutreachDraft>,
}

struct SessionEntry {
    state: SessionState,
    touched_at: DateTime<Utc>,
}

/// In-memory sessions for the API server, keyed by session id.
///
/// Entries idle for longer than `idle_timeout` are dropped, and the map never holds more
/// than `max_sessions` entries; the least recently touched one goes first.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl SessionRegistry {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_limits(
            Duration::minutes(config.idle_timeout_minutes),
            config.max_sessions,
        )
    }

    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Snapshot of a session; unknown or expired ids start empty
    pub async fn get(&self, session_id: &str) -> SessionState {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();

        match sessions.get_mut(session_id) {
            Some(entry) if now - entry.touched_at <= self.idle_timeout => {
                entry.touched_at = now;
                entry.state.clone()
            }
            Some(_) => {
                sessions.remove(session_id);
                SessionState::default()
            }
            None => SessionState::default(),
        }
    }

    pub async fn put(&self, session_id: &str, state: SessionState) {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();

        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.touched_at <= self.idle_timeout);

        if !sessions.contains_key(session_id) {
            while sessions.len() >= self.max_sessions {
                let Some(oldest) = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.touched_at)
                    .map(|(id, _)| id.clone())
                else {
                    break;
                };
                sessions.remove(&oldest);
            }
        }

        let evicted = before.saturating_sub(sessions.len());
        if evicted > 0 {
            debug!("Evicted {} sessions", evicted);
        }

        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                state,
                touched_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub fn new_session_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
