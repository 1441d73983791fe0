use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin session.
///
/// Created when the static credentials are accepted and torn down at logout
/// or expiry. Handlers receive it explicitly instead of reading a global flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session lasting `ttl`.
    pub fn start(email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            started_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expires() {
        let session = Session::start("admin@example.com", Duration::hours(1));
        assert!(session.is_authenticated(session.started_at));
        assert!(!session.is_authenticated(session.expires_at));
        assert_eq!(
            session.remaining(session.expires_at + Duration::minutes(5)),
            Duration::zero()
        );
    }
}
