//! Dashboard aggregation results (KPIs, grouped sums, export result)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sales::BranchSelection;

/// Scalar KPIs over the filtered record set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_sales: Decimal,
    pub total_quantity: i64,
    /// Sum of the "Sales + Tax" column
    pub total_sales_with_tax: Decimal,
    pub gross_margin: Decimal,
    /// Mean over receipts of the per-receipt sales sum
    pub avg_sales_per_receipt: Decimal,
    pub record_count: usize,
    pub receipt_count: usize,
}

/// Sales summed for one group key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub sales: Decimal,
}

/// Month-wise trend point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// `YYYY-MM`
    pub month: String,
    pub sales: Decimal,
    pub sales_amount: Decimal,
}

/// Product row of the top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_name: String,
    pub sales: Decimal,
    pub quantity: i64,
}

/// Year-wise trend point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySales {
    pub year: i32,
    pub sales: Decimal,
}

/// Every grouped aggregation the dashboard and report display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregations {
    pub by_month: Vec<MonthlySales>,
    pub by_pos: Vec<GroupTotal>,
    pub by_day: Vec<GroupTotal>,
    pub by_payment_method: Vec<GroupTotal>,
    pub top_products: Vec<ProductSales>,
    pub by_customer_type: Vec<GroupTotal>,
    pub by_year: Vec<YearlySales>,
    pub by_branch: Vec<GroupTotal>,
}

/// Filter actually applied to produce a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilter {
    pub branch: BranchSelection,
    pub months: Vec<String>,
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub filter: DashboardFilter,
    /// Distinct branches in first-appearance order
    pub branches: Vec<String>,
    /// Distinct month buckets in first-appearance order
    pub months: Vec<String>,
    pub kpis: Kpis,
    pub aggregations: Aggregations,
}

/// Result of a successful PDF export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    /// File name offered to the browser
    pub file_name: String,
    pub size_bytes: usize,
    /// `YYYY-MM-DD HH:MM` local time
    pub generated_at: String,
    /// `data:application/octet-stream;base64,...` link
    pub download_href: String,
}
