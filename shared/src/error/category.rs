//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Data loading errors
/// - 2xxx: Report export errors
/// - 9xxx (and anything unassigned): System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Data loading errors (1xxx)
    Data,
    /// Report export errors (2xxx)
    Report,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Data,
            2000..3000 => Self::Report,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Data => "data",
            Self::Report => "report",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Data);
        assert_eq!(ErrorCategory::from_code(2004), ErrorCategory::Report);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(5000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidDate.category(), ErrorCategory::Data);
        assert_eq!(ErrorCode::LogoNotFound.category(), ErrorCategory::Report);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Report).unwrap();
        assert_eq!(json, "\"report\"");

        let category: ErrorCategory = serde_json::from_str("\"data\"").unwrap();
        assert_eq!(category, ErrorCategory::Data);
    }
}
