use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Session;

/// Live admin sessions.
///
/// A session is usable from `open` until `close` or its expiry, whichever
/// comes first.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn open(&self, session: Session);

    /// Look up a live session. Expired sessions are never returned.
    async fn get(&self, id: Uuid) -> Option<Session>;

    /// Tear a session down. Returns whether it was live.
    async fn close(&self, id: Uuid) -> bool;
}
