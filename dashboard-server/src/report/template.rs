//! HTML document fed to the PDF renderer

use shared::models::{Aggregations, Kpis};
use shared::util::{format_count, format_currency, format_thousands};

use crate::utils::html::{escape, table};

const REPORT_STYLE: &str = r#"
body { font-family: 'Segoe UI', sans-serif; padding: 30px; color: #333; background-color: #fff; }
.header { display: flex; align-items: center; gap: 20px; margin-bottom: 30px; }
.logo { height: 80px; width: 80px; border-radius: 10px; object-fit: contain; }
h1 { color: #2E86C1; margin: 0; font-size: 28px; }
h2 { color: #117A65; border-bottom: 1px solid #ccc; padding-bottom: 5px; margin-top: 40px; }
.kpi { margin-bottom: 10px; font-size: 16px; }
table { width: 100%; border-collapse: collapse; margin-top: 10px; }
th, td { border: 1px solid #ccc; padding: 10px; text-align: left; }
th { background-color: #f0f0f0; }
.footer { margin-top: 50px; font-size: 14px; color: #555; }
"#;

/// Inputs of one report document
pub struct ReportContent<'a> {
    pub title: &'a str,
    pub brand: &'a str,
    pub currency_label: &'a str,
    /// `YYYY-MM-DD HH:MM`
    pub generated_at: &'a str,
    /// Base64-encoded PNG
    pub logo_base64: &'a str,
    pub kpis: &'a Kpis,
    pub aggregations: &'a Aggregations,
}

pub fn render_report_html(content: &ReportContent<'_>) -> String {
    let k = content.kpis;
    let a = content.aggregations;

    let branch_table = table(
        &["Shop", "Sales"],
        a.by_branch
            .iter()
            .map(|g| vec![escape(&g.key), format_thousands(g.sales)]),
    );
    let products_table = table(
        &["Product Name", "Sales", "Quantity"],
        a.top_products.iter().map(|p| {
            vec![
                escape(&p.product_name),
                format_thousands(p.sales),
                format_count(p.quantity),
            ]
        }),
    );
    let payment_table = table(
        &["MOP", "Sales"],
        a.by_payment_method
            .iter()
            .map(|g| vec![escape(&g.key), format_thousands(g.sales)]),
    );
    let customer_table = table(
        &["Customer Name", "Sales"],
        a.by_customer_type
            .iter()
            .map(|g| vec![escape(&g.key), format_thousands(g.sales)]),
    );
    let year_table = table(
        &["Year", "Sales"],
        a.by_year
            .iter()
            .map(|y| vec![y.year.to_string(), format_thousands(y.sales)]),
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><style>{REPORT_STYLE}</style></head>
<body>
<div class="header">
<img src="data:image/png;base64,{logo}" class="logo" />
<div>
<h1>Sales Report</h1>
<p><strong>Generated:</strong> {generated_at}</p>
</div>
</div>
<h2>KPI Summary</h2>
<div class="kpi"><strong>Total Sales:</strong> {total_sales}</div>
<div class="kpi"><strong>Total Quantity:</strong> {total_quantity}</div>
<div class="kpi"><strong>Gross Margin:</strong> {gross_margin}</div>
<div class="kpi"><strong>Total Sales with Tax:</strong> {sales_with_tax}</div>
<div class="kpi"><strong>Avg Sales/Receipt:</strong> {avg}</div>
<h2>Branch Sales</h2>
{branch_table}
<h2>Top Products by Sales</h2>
{products_table}
<h2>Payment Summary</h2>
{payment_table}
<h2>Customer Wise Sales</h2>
{customer_table}
<h2>Year Wise Sales</h2>
{year_table}
<div class="footer">
<p>Generated by <strong>{title}</strong> | Powered by {brand}</p>
</div>
</body>
</html>
"#,
        logo = content.logo_base64,
        generated_at = escape(content.generated_at),
        total_sales = escape(&format_currency(content.currency_label, k.total_sales)),
        total_quantity = format_count(k.total_quantity),
        gross_margin = format_thousands(k.gross_margin),
        sales_with_tax = format_thousands(k.total_sales_with_tax),
        avg = format_thousands(k.avg_sales_per_receipt),
        title = escape(content.title),
        brand = escape(content.brand),
    )
}
