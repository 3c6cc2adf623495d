//! Data models
//!
//! Shared between the dashboard server and consumers of its JSON API.

pub mod dashboard;
pub mod sales;

// Re-exports
pub use dashboard::*;
pub use sales::*;
