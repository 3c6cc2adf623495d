//! Shared fixtures: in-memory fact table, stub renderer, state builder

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashboard_server::core::{AggregationConfig, Config, ReportConfig};
use dashboard_server::db::{FACT_TABLE_SCHEMA, SalesCache, SalesRepository};
use dashboard_server::report::{ExportError, PdfRenderer};
use dashboard_server::ServerState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub const FAKE_PDF: &[u8] = b"%PDF-1.4 fake";

/// One fact row; unlisted columns take the schema defaults
pub struct Fact {
    pub shop: &'static str,
    pub pos: &'static str,
    pub date: &'static str,
    pub day: &'static str,
    pub receipt: &'static str,
    pub customer: &'static str,
    pub product: &'static str,
    pub mop: &'static str,
    pub sales: f64,
    pub quantity: i64,
}

impl Fact {
    pub fn new(shop: &'static str, date: &'static str, sales: f64) -> Self {
        Self {
            shop,
            pos: "POS-1",
            date,
            day: "Monday",
            receipt: "R-1",
            customer: "Dine IN",
            product: "Zinger",
            mop: "Cash",
            sales,
            quantity: 1,
        }
    }
}

/// Single-connection in-memory pool so every query sees the same database
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(FACT_TABLE_SCHEMA).execute(&pool).await.unwrap();
    pool
}

pub async fn insert_facts(pool: &SqlitePool, facts: &[Fact]) {
    for (i, f) in facts.iter().enumerate() {
        sqlx::query(
            r#"INSERT INTO Fact_Table
                (SaleLineItemID, Receipt, Shop_ID, Shop, POS, Date, Day,
                 [Customer Name], [Product Name], Quantity, Sales, [Sales Amount],
                 [Sales + Tax], [Gross Margin (on Sales Amt)], MOP, Load_Date)
               VALUES (?, ?, 1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, '2024-06-01 02:00:00')"#,
        )
        .bind(i as i64 + 1)
        .bind(f.receipt)
        .bind(f.shop)
        .bind(f.pos)
        .bind(f.date)
        .bind(f.day)
        .bind(f.customer)
        .bind(f.product)
        .bind(f.quantity)
        .bind(f.sales)
        .bind(f.sales)
        .bind(f.sales * 1.16)
        .bind(f.sales / 4.0)
        .bind(f.mop)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn seeded_pool(facts: &[Fact]) -> SqlitePool {
    let pool = memory_pool().await;
    insert_facts(&pool, facts).await;
    pool
}

/// The two-branch example: A has 100 in January and 50 in February, B has 30 in January
pub fn two_branch_facts() -> Vec<Fact> {
    vec![
        Fact {
            receipt: "R-1",
            ..Fact::new("A", "2024-01-10", 100.0)
        },
        Fact {
            receipt: "R-2",
            mop: "Card",
            ..Fact::new("A", "2024-02-05 12:30:00", 50.0)
        },
        Fact {
            receipt: "R-3",
            customer: "Takeaway",
            ..Fact::new("B", "2024-01-20", 30.0)
        },
    ]
}

/// Writes a fixed PDF body and counts calls
#[derive(Default)]
pub struct StubRenderer {
    pub calls: AtomicUsize,
}

#[async_trait]
impl PdfRenderer for StubRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), ExportError> {
        assert!(html.contains("Sales Report"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(output, FAKE_PDF)
            .await
            .map_err(|source| ExportError::Write {
                path: output.to_path_buf(),
                source,
            })
    }
}

/// Writes the HTML itself as the "PDF", then lingers like a slow renderer
pub struct SlowEchoRenderer {
    pub delay: std::time::Duration,
}

#[async_trait]
impl PdfRenderer for SlowEchoRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<(), ExportError> {
        tokio::fs::write(output, html)
            .await
            .map_err(|source| ExportError::Write {
                path: output.to_path_buf(),
                source,
            })?;
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Always fails the way a crashing wkhtmltopdf would
pub struct FailingRenderer;

#[async_trait]
impl PdfRenderer for FailingRenderer {
    async fn render(&self, _html: &str, _output: &Path) -> Result<(), ExportError> {
        Err(ExportError::RenderFailed("exit status: 1".into()))
    }
}

pub fn test_config(dir: &Path) -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        http_port: 0,
        environment: "test".into(),
        title: "Sales Dashboard".into(),
        report: ReportConfig {
            logo_path: dir.join("logo.png"),
            renderer_path: dir.join("wkhtmltopdf"),
            output_path: dir.join("out").join("Sales_Report.pdf"),
            file_name: "Sales_Report.pdf".into(),
            brand: "Hot N Spicy".into(),
            currency_label: "PKR".into(),
        },
        aggregation: AggregationConfig::default(),
        cache_ttl: None,
        log_level: "info".into(),
        log_json: false,
        log_dir: None,
    }
}

pub fn write_logo(dir: &Path) {
    std::fs::write(dir.join("logo.png"), b"\x89PNG fake").unwrap();
}

pub fn state_with(pool: SqlitePool, config: Config, renderer: Arc<dyn PdfRenderer>) -> ServerState {
    let cache = SalesCache::new(SalesRepository::new(pool), config.cache_ttl);
    ServerState::new(config, cache, renderer)
}
