//! Dashboard computation
//!
//! - [`SalesDataset`] - the loaded fact table
//! - [`filter`] - branch and month selection
//! - [`aggregator`] - KPIs and grouped sums
//! - [`DashboardService`] - ties the cache to the pure stages

pub mod aggregator;
pub mod dataset;
pub mod filter;
pub mod service;

pub use dataset::SalesDataset;
pub use service::{build_snapshot, DashboardParams, DashboardService};
