//! Reseller Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use rust_decimal::Decimal;
use thiserror::Error;

pub type ResellerResult<T> = Result<T, ResellerError>;

#[derive(Debug, Error)]
pub enum ResellerError {
    /// Caller has no reseller profile
    #[error("Reseller profile not found")]
    NotReseller,

    #[error("Already registered as a reseller")]
    AlreadyReseller,

    /// Admins cannot join the program
    #[error("This account cannot become a reseller")]
    NotEligible,

    #[error("Withdrawal not found")]
    WithdrawalNotFound,

    /// Review of an already reviewed withdrawal
    #[error("Withdrawal has already been reviewed")]
    NotPending,

    #[error("Insufficient balance: {available} available")]
    InsufficientBalance { available: Decimal },

    #[error("Minimum withdrawal is {minimum}")]
    BelowMinimum { minimum: Decimal },

    #[error("{0}")]
    Validation(String),

    /// Generated referral code clashed with an existing one
    #[error("Referral code collision")]
    ReferralCodeCollision,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResellerError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResellerError::NotReseller | ResellerError::WithdrawalNotFound => ErrorKind::NotFound,
            ResellerError::AlreadyReseller | ResellerError::NotPending => ErrorKind::Conflict,
            ResellerError::NotEligible => ErrorKind::Forbidden,
            ResellerError::InsufficientBalance { .. } => ErrorKind::UnprocessableEntity,
            ResellerError::BelowMinimum { .. } | ResellerError::Validation(_) => {
                ErrorKind::BadRequest
            }
            ResellerError::ReferralCodeCollision
            | ResellerError::Database(_)
            | ResellerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            ResellerError::NotReseller => err.with_action("Register as a reseller first"),
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            ResellerError::Database(e) => {
                tracing::error!(error = %e, "Reseller database error");
            }
            ResellerError::Internal(msg) => {
                tracing::error!(message = %msg, "Reseller internal error");
            }
            ResellerError::ReferralCodeCollision => {
                tracing::error!("Referral code generation kept colliding");
            }
            ResellerError::InsufficientBalance { available } => {
                tracing::info!(available = %available, "Withdrawal exceeds balance");
            }
            _ => {
                tracing::debug!(error = %self, "Reseller error");
            }
        }
    }
}

impl IntoResponse for ResellerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ResellerError {
    fn from(err: AppError) -> Self {
        ResellerError::Internal(err.to_string())
    }
}
