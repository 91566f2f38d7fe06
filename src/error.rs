// HTTP API Error Types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::database::manager::DatabaseError;
use crate::validation::ValidationFailure;

/// HTTP API error with appropriate status codes and client-facing messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    Validation(String),
    InvalidId(String),
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

/// Attached to every error response so the envelope middleware can finish
/// the body with request details.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorReport {
    /// Report for an error response that carries no message of its own
    pub fn from_status(status: StatusCode) -> Self {
        let message = status
            .canonical_reason()
            .map(str::to_lowercase)
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        Self { status, message }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::Validation(_)
            | ApiError::InvalidId(_)
            | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Validation(msg) => msg,
            ApiError::InvalidId(msg) => msg,
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        ApiError::InvalidId(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error(other.to_string())
            }
        }
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        for e in failure.errors() {
            tracing::debug!(field = e.field, "validation failed: {}", e.message);
        }
        ApiError::validation(failure.message())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum. The body carries `code` and
// `message`; `middleware::envelope` adds `client_ip` and `server_time`.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let report = ErrorReport {
            status,
            message: self.message().to_string(),
        };
        let mut response = (
            status,
            Json(json!({
                "code": status.as_u16(),
                "message": report.message,
            })),
        )
            .into_response();
        response.extensions_mut().insert(report);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_store_not_found_to_404() {
        let err: ApiError = DatabaseError::NotFound("demo x not found".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "demo x not found");
    }

    #[test]
    fn maps_other_store_errors_to_500_with_message() {
        let err: ApiError = DatabaseError::InvalidUri("bad".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Invalid database URI: bad");
    }

    #[test]
    fn validation_uses_first_message() {
        let err: ApiError = ValidationFailure::single("score", "score is required").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "score is required");
    }

    #[test]
    fn report_from_bare_status_uses_reason() {
        let report = ErrorReport::from_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(report.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(report.message, "method not allowed");
    }

    #[test]
    fn response_carries_report_extension() {
        let response = ApiError::invalid_id("bad id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.status, StatusCode::BAD_REQUEST);
        assert_eq!(report.message, "bad id");
    }
}
