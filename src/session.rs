//! Per-conversation state.
//!
//! Every conversation id gets its own history and portrait flow. In
//! `Shared` mode every id maps to one session, like a single-user
//! bot.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ToddError;
use crate::history::ConversationHistory;
use crate::portrait::PortraitSession;

pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Default)]
pub struct Session {
    pub history: ConversationHistory,
    pub portrait: PortraitSession,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history.reset();
        self.portrait.reset();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    PerSession,
    Shared,
}

impl FromStr for SessionMode {
    type Err = ToddError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-session" | "per_session" | "session" => Ok(SessionMode::PerSession),
            "shared" | "global" | "legacy" => Ok(SessionMode::Shared),
            other => Err(ToddError::Config(format!(
                "unknown session mode '{other}' (expected per-session or shared)"
            ))),
        }
    }
}

pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

struct Entry {
    session: SessionHandle,
    last_seen: Instant,
}

pub struct SessionStore {
    mode: SessionMode,
    ttl: Duration,
    sessions: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new(mode: SessionMode, ttl: Duration) -> Self {
        Self {
            mode,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch or create the session for `id`. Idle sessions past the TTL are
    /// dropped on the way.
    pub fn get(&self, id: Option<&str>) -> SessionHandle {
        let key = match (self.mode, id.map(str::trim)) {
            (SessionMode::PerSession, Some(id)) if !id.is_empty() => id,
            _ => DEFAULT_SESSION_ID,
        };

        let now = Instant::now();
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());

        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|k, e| k == key || now.duration_since(e.last_seen) < ttl);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "pruned idle sessions");
        }

        let entry = sessions.entry(key.to_string()).or_insert_with(|| Entry {
            session: Arc::new(tokio::sync::Mutex::new(Session::new())),
            last_seen: now,
        });
        entry.last_seen = now;
        Arc::clone(&entry.session)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Role;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("shared".parse::<SessionMode>().unwrap(), SessionMode::Shared);
        assert_eq!("Per-Session".parse::<SessionMode>().unwrap(), SessionMode::PerSession);
        assert!("sometimes".parse::<SessionMode>().is_err());
    }

    #[tokio::test]
    async fn test_per_session_isolation() {
        let store = SessionStore::new(SessionMode::PerSession, Duration::from_secs(60));
        store.get(Some("a")).lock().await.history.push(Role::User, "from a");

        assert!(store.get(Some("b")).lock().await.history.is_seed());
        assert!(!store.get(Some("a")).lock().await.history.is_seed());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_shared_mode_uses_one_session() {
        let store = SessionStore::new(SessionMode::Shared, Duration::from_secs(60));
        store.get(Some("a")).lock().await.history.push(Role::User, "from a");

        let other = store.get(Some("b"));
        assert_eq!(other.lock().await.history.last().unwrap().text, "from a");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_id_falls_back_to_default() {
        let store = SessionStore::new(SessionMode::PerSession, Duration::from_secs(60));
        let a = store.get(None);
        let b = store.get(Some("   "));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::new(SessionMode::PerSession, Duration::ZERO);
        store.get(Some("a"));
        store.get(Some("b"));
        assert_eq!(store.len(), 1);
    }
}
