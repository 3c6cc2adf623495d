use std::path::PathBuf;
use std::time::Duration;

use shared::error::{AppError, AppResult};

/// Default customer/channel labels shown in the customer-type chart
pub const DEFAULT_CUSTOMER_TYPES: [&str; 4] = ["Dine IN", "Takeaway", "Delivery", "Food Panda"];

/// Default size of the top-products ranking
pub const DEFAULT_TOP_PRODUCTS_LIMIT: usize = 30;

/// Dashboard server configuration
///
/// # Environment variables
///
/// A `.env` file in the working directory is loaded first (see `main`).
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | sqlite://sales.db | Fact table database |
/// | HTTP_PORT | 8501 | Dashboard HTTP port |
/// | ENVIRONMENT | development | development, staging or production |
/// | DASHBOARD_TITLE | Sales Dashboard | Page title and report footer |
/// | LOGO_PATH | assets/logo.png | Logo embedded in the PDF report |
/// | WKHTMLTOPDF_PATH | wkhtmltopdf | HTML-to-PDF executable |
/// | REPORT_OUTPUT_PATH | Sales_Report.pdf | Where the PDF is written |
/// | REPORT_FILE_NAME | Sales_Report.pdf | Download file name |
/// | REPORT_BRAND | Hot N Spicy | Footer branding |
/// | CURRENCY_LABEL | PKR | Prefix for currency values |
/// | CUSTOMER_TYPES | Dine IN,Takeaway,Delivery,Food Panda | Customer-type allow-list |
/// | TOP_PRODUCTS_LIMIT | 30 | Size of the product ranking |
/// | CACHE_TTL_SECS | (none) | Reload the fact table after this age |
/// | LOG_LEVEL | info | Log level (RUST_LOG overrides) |
/// | LOG_JSON | false | JSON console logs |
/// | LOG_DIR | (none) | Enables rolling file logs |
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection URL for the fact table
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Dashboard page title
    pub title: String,
    /// PDF export settings
    pub report: ReportConfig,
    /// Aggregation settings
    pub aggregation: AggregationConfig,
    /// Fact table cache lifetime (None = until invalidated)
    pub cache_ttl: Option<Duration>,
    /// Log level filter
    pub log_level: String,
    /// JSON console output
    pub log_json: bool,
    /// Directory for rolling file logs
    pub log_dir: Option<String>,
}

/// PDF export settings
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub logo_path: PathBuf,
    pub renderer_path: PathBuf,
    pub output_path: PathBuf,
    pub file_name: String,
    pub brand: String,
    pub currency_label: String,
}

/// Aggregation settings
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Only these customer labels appear in the customer-type breakdown
    pub customer_types: Vec<String>,
    pub top_products_limit: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            customer_types: DEFAULT_CUSTOMER_TYPES.iter().map(|s| s.to_string()).collect(),
            top_products_limit: DEFAULT_TOP_PRODUCTS_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// Missing or unparsable optional values fall back to their defaults;
    /// values that would make the dashboard meaningless are rejected.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let customer_types = match var("CUSTOMER_TYPES") {
            Some(list) => parse_list(&list),
            None => AggregationConfig::default().customer_types,
        };
        if customer_types.is_empty() {
            return Err(AppError::config("CUSTOMER_TYPES must name at least one label"));
        }

        let top_products_limit = match var("TOP_PRODUCTS_LIMIT") {
            Some(v) => v.trim().parse::<usize>().map_err(|_| {
                AppError::config(format!("TOP_PRODUCTS_LIMIT must be a positive integer, got '{}'", v))
            })?,
            None => DEFAULT_TOP_PRODUCTS_LIMIT,
        };
        if top_products_limit == 0 {
            return Err(AppError::config("TOP_PRODUCTS_LIMIT must be greater than zero"));
        }

        let report_file_name = var("REPORT_FILE_NAME").unwrap_or_else(|| "Sales_Report.pdf".into());

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite://sales.db".into()),
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            title: var("DASHBOARD_TITLE").unwrap_or_else(|| "Sales Dashboard".into()),
            report: ReportConfig {
                logo_path: var("LOGO_PATH")
                    .unwrap_or_else(|| "assets/logo.png".into())
                    .into(),
                renderer_path: var("WKHTMLTOPDF_PATH")
                    .unwrap_or_else(|| "wkhtmltopdf".into())
                    .into(),
                output_path: var("REPORT_OUTPUT_PATH")
                    .unwrap_or_else(|| report_file_name.clone())
                    .into(),
                file_name: report_file_name,
                brand: var("REPORT_BRAND").unwrap_or_else(|| "Hot N Spicy".into()),
                currency_label: var("CURRENCY_LABEL").unwrap_or_else(|| "PKR".into()),
            },
            aggregation: AggregationConfig {
                customer_types,
                top_products_limit,
            },
            cache_ttl: var("CACHE_TTL_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: var("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: var("LOG_DIR"),
        })
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Split a comma-separated list, trimming blanks and dropping empties
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://sales.db");
        assert_eq!(config.http_port, 8501);
        assert_eq!(config.report.currency_label, "PKR");
        assert_eq!(config.report.file_name, "Sales_Report.pdf");
        assert_eq!(config.report.output_path, PathBuf::from("Sales_Report.pdf"));
        assert_eq!(
            config.aggregation.customer_types,
            vec!["Dine IN", "Takeaway", "Delivery", "Food Panda"]
        );
        assert_eq!(config.aggregation.top_products_limit, 30);
        assert!(config.cache_ttl.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HTTP_PORT", "9000"),
            ("CUSTOMER_TYPES", " Dine IN , Drive Thru ,,"),
            ("TOP_PRODUCTS_LIMIT", "10"),
            ("CACHE_TTL_SECS", "600"),
            ("REPORT_OUTPUT_PATH", "/tmp/out.pdf"),
            ("ENVIRONMENT", "production"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.aggregation.customer_types, vec!["Dine IN", "Drive Thru"]);
        assert_eq!(config.aggregation.top_products_limit, 10);
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(600)));
        assert_eq!(config.report.output_path, PathBuf::from("/tmp/out.pdf"));
        assert!(config.is_production());
    }

    #[test]
    fn test_unparsable_port_falls_back() {
        let config = config_from(&[("HTTP_PORT", "not-a-port")]).unwrap();
        assert_eq!(config.http_port, 8501);
    }

    #[test]
    fn test_rejects_zero_top_limit() {
        let err = config_from(&[("TOP_PRODUCTS_LIMIT", "0")]).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ConfigError);

        let err = config_from(&[("TOP_PRODUCTS_LIMIT", "many")]).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ConfigError);
    }

    #[test]
    fn test_rejects_empty_customer_list() {
        let err = config_from(&[("CUSTOMER_TYPES", " , ,")]).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ConfigError);
    }
}
