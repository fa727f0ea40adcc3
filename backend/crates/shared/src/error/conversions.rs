//! Conversions into [`AppError`] and its HTTP rendering

use super::app_error::AppError;

/// Detail rendered for every 5xx response
pub const GENERIC_SERVER_ERROR: &str = "An unexpected error occurred";

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::bad_request("Invalid identifier").with_source(err)
    }
}

// ============================================================================
// sqlx
// ============================================================================

/// Fallback mapping. Repositories translate the constraints they expect
/// (slug taken, referral code clash, stock exhausted) into domain errors first.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let mapped = match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database unavailable")
            }
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    AppError::conflict("Record already exists")
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    AppError::conflict("Referenced record does not exist")
                }
                sqlx::error::ErrorKind::CheckViolation => {
                    AppError::bad_request("Value out of range")
                }
                sqlx::error::ErrorKind::NotNullViolation => {
                    AppError::bad_request("Required field is missing")
                }
                _ => match db.code().as_deref() {
                    // serialization failure, deadlock
                    Some("40001" | "40P01") => {
                        AppError::service_unavailable("Concurrent update, please retry")
                    }
                    _ => AppError::internal("Database error"),
                },
            },
            _ => AppError::internal("Database error"),
        };
        mapped.with_source(err)
    }
}

// ============================================================================
// axum
// ============================================================================

/// RFC 7807 problem details
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::{HeaderValue, StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (detail, action) = if self.is_server_error() {
            (GENERIC_SERVER_ERROR, None)
        } else {
            (self.message(), self.action())
        };

        let body = serde_json::json!({
            "type": "about:blank",
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": detail,
            "action": action,
        });

        let mut response = (status, Json(body)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}
