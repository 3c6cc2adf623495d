//! Shared types for the sales dashboard
//!
//! Error codes, the API response envelope and the sales/dashboard models
//! used by the server and by anything consuming its JSON API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
