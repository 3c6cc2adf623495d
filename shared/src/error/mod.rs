//! Unified error system for the sales dashboard
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Data loading errors
//! - 2xxx: Report export errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::LogoNotFound, "logo.png is missing")
//!     .with_detail("path", "assets/logo.png");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
