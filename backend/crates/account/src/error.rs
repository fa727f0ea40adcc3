//! Account Error Types

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Address not found")]
    AddressNotFound,

    /// Unknown team, or a team the caller does not belong to
    #[error("Team not found")]
    TeamNotFound,

    #[error("Team member not found")]
    MemberNotFound,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Insufficient team permissions")]
    Forbidden,

    #[error("Team slug is already taken")]
    SlugTaken,

    #[error("User is already a member of this team")]
    AlreadyMember,

    #[error("A team must keep at least one owner")]
    LastOwner,

    #[error("Admins cannot remove their own admin role")]
    SelfDemotion,

    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("{0}")]
    Validation(String),

    /// Password policy and hashing errors from the auth domain
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::UserNotFound
            | AccountError::AddressNotFound
            | AccountError::TeamNotFound
            | AccountError::MemberNotFound => ErrorKind::NotFound,
            AccountError::WrongPassword => ErrorKind::Unauthorized,
            AccountError::Forbidden => ErrorKind::Forbidden,
            AccountError::SlugTaken
            | AccountError::AlreadyMember
            | AccountError::LastOwner
            | AccountError::SelfDemotion => ErrorKind::Conflict,
            AccountError::InvalidRole(_) | AccountError::Validation(_) => ErrorKind::BadRequest,
            AccountError::Auth(e) => e.kind(),
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Auth(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::WrongPassword => {
                tracing::warn!("Password change with wrong current password");
            }
            AccountError::Forbidden | AccountError::SelfDemotion | AccountError::LastOwner => {
                tracing::info!(error = %self, "Account rule rejected request");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
