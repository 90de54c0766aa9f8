use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    /// Client data failed validation or tried to change the username
    #[error("{0}")]
    InvalidUser(String),

    #[error("Username {0} already exists")]
    Conflict(String),

    #[error("Username {0} not found")]
    NotFound(String),

    #[error("Bad credentials")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::InvalidUser(_) => StatusCode::BAD_REQUEST,
            UserError::Conflict(_) => StatusCode::CONFLICT,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::Unauthorized => StatusCode::UNAUTHORIZED,
            UserError::Database(_) | UserError::PasswordHash(_) | UserError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Client errors render as plain text carrying the message verbatim;
/// backend failures go through [`AppError`] and never expose their cause.
///
/// The 401 challenge header is added by the Basic auth middleware, which
/// knows the realm.
impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::Database(e) => AppError::Database(e).into_response(),
            UserError::PasswordHash(msg) => {
                let msg = format!("password hashing: {}", msg);
                AppError::InternalServerError(msg).into_response()
            }
            UserError::Internal(msg) => AppError::InternalServerError(msg).into_response(),
            other => {
                tracing::debug!(status = %other.status(), error = %other, "Request rejected");
                (other.status(), other.to_string()).into_response()
            }
        }
    }
}
