//! Authentication ports.

use uuid::Uuid;

use crate::domain::Session;

/// Encodes sessions into bearer tokens and back.
pub trait TokenService: Send + Sync {
    /// Issue a bearer token for a session.
    fn issue(&self, session: &Session) -> Result<String, AuthError>;

    /// Validate a token and return the session id it names.
    fn session_id(&self, token: &str) -> Result<Uuid, AuthError>;
}

/// Checks the static admin credential pair.
pub trait CredentialVerifier: Send + Sync {
    /// `Ok(false)` on a wrong email or password; `Err` only on internal failure.
    fn verify(&self, email: &str, password: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
