//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (paths, column names, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a data load error
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DataLoadFailed, msg)
    }

    /// Create an invalid date error for a given column
    pub fn invalid_date(column: &str, value: &str) -> Self {
        Self::with_message(
            ErrorCode::InvalidDate,
            format!("Cannot parse {} value '{}' as a date", column, value),
        )
        .with_detail("column", column)
        .with_detail("value", value)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

/// Unified API response structure
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(0),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system and data errors; report errors are logged by the exporter
        if matches!(
            self.code.category(),
            super::category::ErrorCategory::System | super::category::ErrorCategory::Data
        ) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.code == Some(0) || self.code.is_none() {
            http::StatusCode::OK
        } else {
            ErrorCode::try_from(self.code.unwrap_or(1))
                .map(|c| c.http_status())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Unknown month bucket")
            .with_detail("field", "month")
            .with_detail("value", "2024-13");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "month");
        assert_eq!(details.get("value").unwrap(), "2024-13");
    }

    #[test]
    fn test_invalid_date_constructor() {
        let err = AppError::invalid_date("Date", "31/02/2024");
        assert_eq!(err.code, ErrorCode::InvalidDate);
        assert!(err.message.contains("31/02/2024"));
        let details = err.details.unwrap();
        assert_eq!(details.get("column").unwrap(), "Date");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::NotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::data_load("connection refused").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::LogoNotFound, "logo missing");
        assert_eq!(format!("{}", err), "logo missing");
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert_eq!(response.code, Some(0));
        assert_eq!(response.message, "OK");
        assert_eq!(response.data, Some(42));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::with_message(ErrorCode::RenderFailed, "wkhtmltopdf exited with 1")
            .with_detail("status", 1);
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(2003));
        assert_eq!(response.message, "wkhtmltopdf exited with 1");
        assert!(response.data.is_none());
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"code\":0"));
        assert!(json.contains("\"message\":\"OK\""));
        assert!(json.contains("\"data\":\"hello\""));
    }
}
