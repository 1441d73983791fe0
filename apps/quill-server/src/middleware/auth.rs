//! Admin session extractors.

use std::future::Future;
use std::pin::Pin;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use chrono::Utc;

use quill_core::domain::Session;
use quill_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// A live admin session.
///
/// Use this in handlers to require the admin login:
/// ```ignore
/// async fn delete_post(admin: AdminSession) -> impl Responder {
///     format!("Hello, {}!", admin.0.email)
/// }
/// ```
/// Requests without one get a 401 that points the client at the login page.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl AdminSession {
    pub fn id(&self) -> uuid::Uuid {
        self.0.id
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

async fn resolve(
    state: Option<web::Data<AppState>>,
    token: Result<String, AuthError>,
) -> Result<Session, AppError> {
    let state = state.ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;
    let session_id = state.tokens.session_id(&token?)?;

    match state.sessions.get(session_id).await {
        Some(session) if session.is_authenticated(Utc::now()) => Ok(session),
        _ => {
            tracing::debug!(session_id = %session_id, "Token names no live session");
            Err(AuthError::SessionExpired.into())
        }
    }
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move { resolve(state, token).await.map(AdminSession) })
    }
}

/// Optional session extractor - doesn't fail if not authenticated.
pub struct OptionalSession(pub Option<Session>);

impl FromRequest for OptionalSession {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move { Ok(OptionalSession(resolve(state, token).await.ok())) })
    }
}
