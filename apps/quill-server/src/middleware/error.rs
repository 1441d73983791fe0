//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;
use quill_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// No live admin session. Clients are sent to the login page.
    #[error("Admin session required: {0}")]
    Unauthenticated(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Validation errors: {0}")]
    Validation(String),
    /// The data API refused the request.
    #[error("Upstream rejected request: {0}")]
    Upstream(String),
    /// The data API could not be reached.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthenticated(detail) => ErrorResponse::admin_required(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Validation(detail) => ErrorResponse::unprocessable(detail),
            AppError::Upstream(detail) => ErrorResponse::bad_gateway(detail),
            AppError::Unavailable(detail) => ErrorResponse::service_unavailable(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Network(msg) => {
                tracing::error!("Data API unreachable: {}", msg);
                AppError::Unavailable("The data service is unreachable. Try again later.".to_string())
            }
            RepoError::Rejected { status, detail } => {
                tracing::error!(status, "Data API rejected request: {}", detail);
                AppError::Upstream(format!("The data service rejected the request ({status})"))
            }
            RepoError::Decode(msg) => {
                tracing::error!("Malformed data API response: {}", msg);
                AppError::Upstream("The data service sent an unreadable response".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthenticated("Invalid email or password.".to_string())
            }
            AuthError::SessionExpired => AppError::Unauthenticated(
                "Your session has expired. Please log in again.".to_string(),
            ),
            AuthError::InvalidToken(msg) => AppError::Unauthenticated(msg),
            AuthError::MissingAuth => AppError::Unauthenticated(
                "Provide the session token as a Bearer token in the Authorization header."
                    .to_string(),
            ),
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
