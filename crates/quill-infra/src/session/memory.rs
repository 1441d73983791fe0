//! In-memory admin session store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Session;
use quill_core::ports::SessionStore;

/// Sessions keyed by id, behind an async RwLock.
///
/// Expired entries are dropped lazily when looked up, and in bulk on every
/// `open`. Note: every session ends on process restart.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn open(&self, session: Session) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.is_authenticated(now));
        tracing::info!(session_id = %session.id, expires_at = %session.expires_at, "Admin session opened");
        sessions.insert(session.id, session);
    }

    async fn get(&self, id: Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id)?;

        if !session.is_authenticated(Utc::now()) {
            drop(sessions);
            self.sessions.write().await.remove(&id);
            tracing::debug!(session_id = %id, "Expired session dropped");
            return None;
        }

        Some(session.clone())
    }

    async fn close(&self, id: Uuid) -> bool {
        let closed = self.sessions.write().await.remove(&id);
        match closed {
            Some(session) => {
                tracing::info!(session_id = %id, "Admin session closed");
                session.is_authenticated(Utc::now())
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_open_get_close() {
        let store = InMemorySessionStore::new();
        let session = Session::start("admin@example.com", Duration::hours(1));
        store.open(session.clone()).await;

        assert_eq!(store.get(session.id).await, Some(session.clone()));
        assert!(store.close(session.id).await);
        assert_eq!(store.get(session.id).await, None);
        assert!(!store.close(session.id).await);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_returned() {
        let store = InMemorySessionStore::new();
        let mut session = Session::start("admin@example.com", Duration::hours(1));
        session.expires_at = session.started_at - Duration::seconds(1);
        store.open(session.clone()).await;

        assert_eq!(store.get(session.id).await, None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_open_prunes_expired_sessions() {
        let store = InMemorySessionStore::new();
        let mut stale = Session::start("admin@example.com", Duration::hours(1));
        stale.expires_at = stale.started_at - Duration::seconds(1);
        store.sessions.write().await.insert(stale.id, stale);

        store
            .open(Session::start("admin@example.com", Duration::hours(1)))
            .await;
        assert_eq!(store.len().await, 1);
    }
}
