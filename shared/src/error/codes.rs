//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Data loading errors
//! - 2xxx: Report export errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Data ====================
    /// Sales data could not be loaded
    DataLoadFailed = 1001,
    /// A date column could not be parsed
    InvalidDate = 1002,

    // ==================== 2xxx: Report ====================
    /// Branding logo file missing or unreadable
    LogoNotFound = 2001,
    /// PDF renderer executable not found
    RendererNotFound = 2002,
    /// PDF renderer exited with failure
    RenderFailed = 2003,
    /// Report file could not be written or read back
    ReportWriteFailed = 2004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Data
            ErrorCode::DataLoadFailed => "Failed to load sales data",
            ErrorCode::InvalidDate => "Invalid date value in sales data",

            // Report
            ErrorCode::LogoNotFound => "Report logo not found",
            ErrorCode::RendererNotFound => "PDF renderer not found",
            ErrorCode::RenderFailed => "PDF rendering failed",
            ErrorCode::ReportWriteFailed => "Failed to write report file",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Data
            1001 => Ok(ErrorCode::DataLoadFailed),
            1002 => Ok(ErrorCode::InvalidDate),

            // Report
            2001 => Ok(ErrorCode::LogoNotFound),
            2002 => Ok(ErrorCode::RendererNotFound),
            2003 => Ok(ErrorCode::RenderFailed),
            2004 => Ok(ErrorCode::ReportWriteFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
