//! Bearer tokens naming an admin session.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::Session;
use quill_core::ports::{AuthError, TokenService};

/// Session token configuration.
#[derive(Debug, Clone)]
pub struct SessionTokenConfig {
    pub secret: String,
    pub issuer: String,
}

impl Default for SessionTokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "quill".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // session id
    email: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-encoded session tokens.
///
/// The token only names the session and carries its expiry; whether the
/// session is still open is decided by the session store, so logout takes
/// effect before the token expires.
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtSessionTokens {
    pub fn new(config: SessionTokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer,
        }
    }
}

impl TokenService for JwtSessionTokens {
    fn issue(&self, session: &Session) -> Result<String, AuthError> {
        let claims = Claims {
            sub: session.id.to_string(),
            email: session.email.clone(),
            exp: session.expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn session_id(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tokens(secret: &str, issuer: &str) -> JwtSessionTokens {
        JwtSessionTokens::new(SessionTokenConfig {
            secret: secret.to_string(),
            issuer: issuer.to_string(),
        })
    }

    #[test]
    fn test_issue_and_decode() {
        let service = tokens("test-secret", "test");
        let session = Session::start("admin@example.com", Duration::hours(1));

        let token = service.issue(&session).unwrap();
        assert_eq!(service.session_id(&token).unwrap(), session.id);
    }

    #[test]
    fn test_expired_token() {
        let service = tokens("test-secret", "test");
        let mut session = Session::start("admin@example.com", Duration::hours(1));
        session.expires_at = session.started_at - Duration::hours(2);

        let token = service.issue(&session).unwrap();
        assert!(matches!(
            service.session_id(&token),
            Err(AuthError::SessionExpired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        let service = tokens("test-secret", "test");
        assert!(matches!(
            service.session_id("not-a-token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_secret_or_issuer_rejected() {
        let session = Session::start("admin@example.com", Duration::hours(1));
        let token = tokens("secret-a", "quill").issue(&session).unwrap();

        assert!(tokens("secret-b", "quill").session_id(&token).is_err());
        assert!(tokens("secret-a", "other").session_id(&token).is_err());
    }
}
