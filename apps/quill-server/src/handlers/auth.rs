//! Admin login and session handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::domain::Session;
use quill_core::ports::AuthError;
use quill_shared::ApiResponse;
use quill_shared::dto::{LoginRequest, SessionResponse, SessionStatus};

use crate::middleware::auth::{AdminSession, OptionalSession};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if !state.credentials.verify(&req.email, &req.password)? {
        tracing::warn!(email = %req.email, "Rejected admin login");
        return Err(AuthError::InvalidCredentials.into());
    }

    let session = Session::start(req.email.trim(), state.session_ttl);
    let token = state.tokens.issue(&session)?;
    let expires_in = session.remaining(Utc::now()).num_seconds().max(0) as u64;
    let expires_at = session.expires_at;
    state.sessions.open(session).await;

    Ok(HttpResponse::Ok().json(SessionResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in,
        expires_at,
    }))
}

/// POST /api/auth/logout - Protected route
pub async fn logout(
    state: web::Data<AppState>,
    admin: AdminSession,
) -> AppResult<HttpResponse> {
    state.sessions.close(admin.id()).await;
    tracing::info!(session_id = %admin.id(), "Admin session closed");
    Ok(HttpResponse::Ok().json(ApiResponse::message("Logged out")))
}

/// GET /api/auth/session
pub async fn session(session: OptionalSession) -> HttpResponse {
    let status = match session.0 {
        Some(session) => SessionStatus {
            authenticated: true,
            email: Some(session.email),
            expires_at: Some(session.expires_at),
        },
        None => SessionStatus {
            authenticated: false,
            email: None,
            expires_at: None,
        },
    };
    HttpResponse::Ok().json(status)
}
