//! Error handling middleware - RFC 7807 compliant responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use bookshop_core::error::DomainError;
use bookshop_core::ports::AuthError;
use bookshop_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccountNotFound(_) => AppError::NotFound(err.to_string()),

            AuthError::UserExists
            | AuthError::UserInactive
            | AuthError::InvalidCredentials
            | AuthError::InvalidResetKey
            | AuthError::Validation(_)
            | AuthError::ClaimIdInvalid
            | AuthError::ClaimEmailInvalid
            | AuthError::ClaimExpired
            | AuthError::ClaimNotYetValid
            | AuthError::ClaimInvalid(_)
            | AuthError::SignatureInvalid => AppError::BadRequest(err.to_string()),

            AuthError::Unauthorized | AuthError::TokenRevoked => {
                AppError::Unauthorized(err.to_string())
            }

            AuthError::Store(_)
            | AuthError::Repository(_)
            | AuthError::Hashing(_)
            | AuthError::Signing(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(_) | DomainError::Duplicate(_) => {
                AppError::BadRequest(err.to_string())
            }
            DomainError::Unauthorized => AppError::Unauthorized(err.to_string()),
            DomainError::Internal(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
