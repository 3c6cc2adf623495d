//! Core module - configuration, state and server lifecycle
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared request state
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup and serve errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{AggregationConfig, Config, ReportConfig};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
