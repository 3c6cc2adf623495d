//! Branch sales dashboard server
//!
//! Loads the sales fact table once, filters it by branch and month per
//! request, and serves KPIs, grouped charts and a PDF report export.
//!
//! ```text
//! dashboard-server/src/
//! ├── core/        # config, state, server, errors
//! ├── db/          # fact table loader and cache
//! ├── dashboard/   # filter and aggregation
//! ├── render/      # HTML page and SVG charts
//! ├── report/      # PDF export
//! ├── api/         # HTTP routes and handlers
//! └── utils/       # logging, HTML helpers
//! ```

pub mod api;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod render;
pub mod report;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use dashboard::{DashboardParams, DashboardService, SalesDataset};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, read configuration and start logging
pub fn setup_environment() -> anyhow::Result<Config> {
    // a missing .env file is fine, the process environment still applies
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____       __             ____             __    __                         __
  / ___/____ _/ /__  _____   / __ \____ ______/ /_  / /_  ____  ____ __________/ /
  \__ \/ __ `/ / _ \/ ___/  / / / / __ `/ ___/ __ \/ __ \/ __ \/ __ `/ ___/ __  /
 ___/ / /_/ / /  __(__  )  / /_/ / /_/ (__  ) / / / /_/ / /_/ / /_/ / /  / /_/ /
/____/\__,_/_/\___/____/  /_____/\__,_/____/_/ /_/_.___/\____/\__,_/_/   \__,_/
    "#
    );
}
