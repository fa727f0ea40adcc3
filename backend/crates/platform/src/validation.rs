//! Request body validation
//!
//! [`ValidatedJson`] deserializes a JSON body and runs its
//! [`validator::Validate`] rules before the handler sees it. Every failure
//! surfaces as a 400 with the offending fields listed.

use axum::Json;
use axum::extract::{FromRequest, Request};
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// JSON body that has passed schema validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            AppError::bad_request(rejection.body_text())
        })?;

        value.validate().map_err(|errors| {
            let message = describe(&errors);
            tracing::debug!(%message, "Request validation failed");
            AppError::bad_request(message)
        })?;

        Ok(Self(value))
    }
}

/// Flatten validation errors into `"field: message; other: message"`
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect(errors, "", &mut parts);
    parts.sort();
    format!("Validation failed: {}", parts.join("; "))
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let detail = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(format!("{}: {}", path, detail));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

// ============================================================================
// Shared rules
// ============================================================================

/// Lowercase URL slug: `[a-z0-9]` words joined by single hyphens
pub fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("slug");
        error.message = Some("must be lowercase letters, digits and single hyphens".into());
        Err(error)
    }
}

/// Phone number: optional leading `+`, then 8 to 15 digits
pub fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("phone");
        error.message = Some("must be 8 to 15 digits, optionally prefixed with +".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct NewCategory {
        #[validate(length(min = 1, max = 80))]
        name: String,
        #[validate(custom(function = "validate_slug"))]
        slug: String,
    }

    fn json_request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let req = json_request(r#"{"name":"Outerwear","slug":"outer-wear"}"#);
        let ValidatedJson(body) = ValidatedJson::<NewCategory>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(body.slug, "outer-wear");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let req = json_request(r#"{"name":"#);
        let err = ValidatedJson::<NewCategory>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rule_violation_is_400_naming_field() {
        let req = json_request(r#"{"name":"","slug":"Bad Slug"}"#);
        let err = ValidatedJson::<NewCategory>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(err.message().contains("name"));
        assert!(err.message().contains("slug"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("summer-2025").is_ok());
        assert!(validate_slug("Summer").is_err());
        assert!(validate_slug("-lead").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+6281234567890").is_ok());
        assert!(validate_phone("081234567").is_ok());
        assert!(validate_phone("12-34").is_err());
        assert!(validate_phone("+1").is_err());
    }
}
