//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 503 Service Unavailable (renderer binary missing, fixable by ops)
            Self::RendererNotFound => StatusCode::SERVICE_UNAVAILABLE,

            // 502 Bad Gateway (external renderer failed)
            Self::RenderFailed => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::Unknown
            | Self::DataLoadFailed
            | Self::InvalidDate
            | Self::LogoNotFound
            | Self::ReportWriteFailed
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest | Self::InvalidFormat => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}
