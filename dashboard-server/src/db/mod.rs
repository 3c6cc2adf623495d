//! Database layer
//!
//! - [`SalesRepository`] - the single fact-table read
//! - [`SalesCache`] - process-lifetime cache of the loaded dataset

pub mod cache;
pub mod sales;

pub use cache::SalesCache;
pub use sales::SalesRepository;

use shared::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Fact table schema, used by tests and local seeding
pub const FACT_TABLE_SCHEMA: &str = include_str!("../../sql/fact_table.sql");

/// Convert a sqlx error into an AppError with the right code
pub fn sqlx_err_to_app(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            AppError::data_load(format!("Fact table query failed: {}", db_err.message()))
        }
        sqlx::Error::ColumnNotFound(column) => {
            AppError::data_load(format!("Fact table column missing: {}", column))
                .with_detail("column", column.clone())
        }
        sqlx::Error::ColumnDecode { index, source } => {
            AppError::data_load(format!("Cannot decode column {}: {}", index, source))
        }
        _ => AppError::database(err.to_string()),
    }
}

/// Open a read-only style pool against the configured database
///
/// The dashboard never writes, so a couple of connections are plenty.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {}", e)))?;

    SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .map_err(sqlx_err_to_app)
}
