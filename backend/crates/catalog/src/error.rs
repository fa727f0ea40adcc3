//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown product, or an inactive one on a public route
    #[error("Product not found")]
    ProductNotFound,

    #[error("Variant not found")]
    VariantNotFound,

    #[error("Size not found")]
    SizeNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Team not found")]
    TeamNotFound,

    /// Caller is neither a team owner/admin nor a global admin
    #[error("Insufficient permissions for this team's catalog")]
    Forbidden,

    #[error("Slug is already taken")]
    SlugTaken,

    #[error("SKU is already taken")]
    SkuTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ProductNotFound
            | CatalogError::VariantNotFound
            | CatalogError::SizeNotFound
            | CatalogError::CategoryNotFound
            | CatalogError::TeamNotFound => ErrorKind::NotFound,
            CatalogError::Forbidden => ErrorKind::Forbidden,
            CatalogError::SlugTaken | CatalogError::SkuTaken => ErrorKind::Conflict,
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::Forbidden => {
                tracing::info!("Catalog write rejected for non-manager");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        CatalogError::Internal(err.to_string())
    }
}
