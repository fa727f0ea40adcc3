//! Commerce Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::order_status::OrderStatus;

pub type CommerceResult<T> = Result<T, CommerceError>;

#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("Cart is empty")]
    CartEmpty,

    #[error("Product not found")]
    ProductNotFound,

    /// Size missing or not part of the given variant
    #[error("Size not found")]
    SizeNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Address not found")]
    AddressNotFound,

    #[error("{item} is out of stock")]
    OutOfStock { item: String },

    #[error("Only {available} left of {item}")]
    InsufficientStock { item: String, available: i32 },

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Unknown referral code")]
    InvalidReferralCode,

    #[error("{0}")]
    Validation(String),

    /// Webhook sent without the shared callback token
    #[error("Invalid callback token")]
    InvalidCallbackToken,

    #[error("Payment provider unavailable: {0}")]
    PaymentGateway(String),

    /// Status change committed, reseller commission not yet credited
    #[error("Order {order_code} updated but its commission is not credited yet")]
    CommissionPending { order_code: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommerceError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CommerceError::CartEmpty
            | CommerceError::InvalidReferralCode
            | CommerceError::Validation(_) => ErrorKind::BadRequest,
            CommerceError::ProductNotFound
            | CommerceError::SizeNotFound
            | CommerceError::OrderNotFound
            | CommerceError::AddressNotFound => ErrorKind::NotFound,
            CommerceError::OutOfStock { .. }
            | CommerceError::InsufficientStock { .. }
            | CommerceError::InvalidTransition { .. } => ErrorKind::Conflict,
            CommerceError::InvalidCallbackToken => ErrorKind::Unauthorized,
            CommerceError::PaymentGateway(_) | CommerceError::CommissionPending { .. } => {
                ErrorKind::ServiceUnavailable
            }
            CommerceError::Database(_) | CommerceError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            CommerceError::InsufficientStock { .. } | CommerceError::OutOfStock { .. } => {
                err.with_action("Update the quantity in your cart and try again")
            }
            CommerceError::PaymentGateway(_) | CommerceError::CommissionPending { .. } => {
                err.with_action("Please try again in a moment")
            }
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            CommerceError::Database(e) => {
                tracing::error!(error = %e, "Commerce database error");
            }
            CommerceError::Internal(msg) => {
                tracing::error!(message = %msg, "Commerce internal error");
            }
            CommerceError::PaymentGateway(msg) => {
                tracing::warn!(message = %msg, "Payment gateway failure");
            }
            CommerceError::CommissionPending { order_code } => {
                tracing::error!(order_code = %order_code, "Commission credit outstanding");
            }
            CommerceError::InvalidCallbackToken => {
                tracing::warn!("Payment webhook rejected: bad callback token");
            }
            CommerceError::InvalidTransition { from, to } => {
                tracing::info!(from = %from, to = %to, "Rejected order transition");
            }
            _ => {
                tracing::debug!(error = %self, "Commerce error");
            }
        }
    }
}

impl IntoResponse for CommerceError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CommerceError {
    fn from(err: AppError) -> Self {
        CommerceError::Internal(err.to_string())
    }
}
