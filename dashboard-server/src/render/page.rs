//! Server-rendered dashboard page

use std::fmt::Write;

use shared::models::{BranchSelection, DashboardSnapshot, ReportExport, ALL_BRANCHES};
use shared::util::{format_count, format_thousands};

use super::charts::{self, Point};
use crate::utils::html::{escape, table};

const STYLE: &str = r#"
body { font-family: 'Segoe UI', sans-serif; margin: 0; color: #333; background: #f6f7f9; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 240px; padding: 20px; background: #fff; border-right: 1px solid #e3e3e3; }
.sidebar h2 { font-size: 18px; margin-top: 0; }
.sidebar fieldset { border: none; padding: 0; margin: 0 0 18px 0; }
.sidebar legend { font-weight: bold; margin-bottom: 6px; }
.sidebar label { display: block; margin: 3px 0; }
main { flex: 1; padding: 24px 32px; }
h1 { color: #2E86C1; margin-top: 0; }
.kpis { display: flex; flex-wrap: wrap; }
.kpi-card { background: white; padding: 20px; border-radius: 15px; box-shadow: 0 4px 8px rgba(0,0,0,0.1); text-align: center; margin: 5px; flex: 1; min-width: 160px; }
.kpi-title { font-size: 16px; font-weight: bold; color: #444; margin-bottom: 8px; }
.kpi-value { font-size: 22px; font-weight: bold; color: #2E86C1; }
section { background: #fff; border-radius: 10px; padding: 12px 16px; margin: 16px 0; }
.chart { width: 100%; height: auto; }
.chart-title { font-size: 15px; font-weight: bold; fill: #333; }
.chart-empty { font-size: 13px; fill: #777; }
.tick { font-size: 11px; fill: #555; }
.value { font-size: 11px; fill: #117A65; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 6px 10px; text-align: left; }
th { background: #f0f0f0; }
.message { padding: 10px 14px; border-radius: 6px; margin: 10px 0; }
.success { background: #e8f6ee; color: #196f3d; }
.error { background: #fdecea; color: #922b21; }
"#;

/// Result of a PDF export attempt shown under the export button
#[derive(Debug, Clone)]
pub enum ExportNotice {
    Generated(ReportExport),
    Failed(String),
}

/// Everything the page template needs
pub struct PageContext<'a> {
    pub title: &'a str,
    pub snapshot: &'a DashboardSnapshot,
    pub top_products_limit: usize,
    pub customer_types: &'a [String],
    pub export: Option<&'a ExportNotice>,
}

/// Render the full dashboard HTML document
pub fn render_dashboard(ctx: &PageContext<'_>) -> String {
    let snapshot = ctx.snapshot;
    let mut html = String::with_capacity(32 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><style>{STYLE}</style></head><body><div class="layout">"#,
        title = escape(ctx.title),
    );

    html.push_str(&sidebar(snapshot));

    let _ = write!(
        html,
        r#"<main><h1>📊 {}</h1><p>Showing <strong>{}</strong> · {} month(s) selected</p>"#,
        escape(ctx.title),
        escape(snapshot.filter.branch.label()),
        snapshot.filter.months.len(),
    );

    html.push_str(&kpi_cards(snapshot));
    html.push_str(&chart_sections(ctx));
    html.push_str(&export_section(snapshot, ctx.export));

    html.push_str("</main></div></body></html>");
    html
}

fn sidebar(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::from(r#"<aside class="sidebar"><h2>Filters</h2><form method="get" action="/">"#);

    out.push_str("<fieldset><legend>Select Branch</legend>");
    let all_checked = matches!(snapshot.filter.branch, BranchSelection::All);
    let _ = write!(
        out,
        r#"<label><input type="radio" name="branch" value="{ALL_BRANCHES}"{}> All branches</label>"#,
        checked(all_checked),
    );
    for branch in &snapshot.branches {
        let selected = snapshot.filter.branch == BranchSelection::Shop(branch.clone());
        let _ = write!(
            out,
            r#"<label><input type="radio" name="branch" value="{v}"{c}> {v}</label>"#,
            v = escape(branch),
            c = checked(selected),
        );
    }
    out.push_str("</fieldset>");

    out.push_str(r#"<fieldset><legend>Select Month</legend><input type="hidden" name="months_set" value="1">"#);
    for month in &snapshot.months {
        let selected = snapshot.filter.months.contains(month);
        let _ = write!(
            out,
            r#"<label><input type="checkbox" name="month" value="{v}"{c}> {v}</label>"#,
            v = escape(month),
            c = checked(selected),
        );
    }
    out.push_str(r#"</fieldset><button type="submit">Apply</button></form></aside>"#);
    out
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

fn kpi_cards(snapshot: &DashboardSnapshot) -> String {
    let k = &snapshot.kpis;
    let cards = [
        ("💰 Total Sales", format_thousands(k.total_sales)),
        ("📦 Total Quantity", format_count(k.total_quantity)),
        ("🧾 Sales With Tax", format_thousands(k.total_sales_with_tax)),
        ("📈 Gross Margin", format_thousands(k.gross_margin)),
        ("🔹 Avg. Sales / Receipt", format_thousands(k.avg_sales_per_receipt)),
    ];

    let mut out = String::from(r#"<h2>🔑 Key Performance Indicators</h2><div class="kpis">"#);
    for (title, value) in cards {
        let _ = write!(
            out,
            r#"<div class="kpi-card"><div class="kpi-title">{title}</div><div class="kpi-value">{value}</div></div>"#
        );
    }
    out.push_str("</div>");
    out
}

fn section(out: &mut String, heading: &str, body: &str) {
    let _ = write!(out, "<section><h3>{}</h3>{}</section>", heading, body);
}

fn chart_sections(ctx: &PageContext<'_>) -> String {
    let aggs = &ctx.snapshot.aggregations;
    let mut out = String::new();

    let trend: Vec<Point> = aggs
        .by_month
        .iter()
        .map(|m| Point::new(&m.month, m.sales_amount))
        .collect();
    section(&mut out, "📅 Month-wise Sales Trend", &charts::line_chart("Month-wise Sales", &trend));

    let pos: Vec<Point> = aggs.by_pos.iter().map(|g| Point::new(&g.key, g.sales)).collect();
    section(&mut out, "💻 POS-wise Performance", &charts::bar_chart("Sales by POS", &pos));

    let days: Vec<Point> = aggs.by_day.iter().map(|g| Point::new(&g.key, g.sales)).collect();
    section(&mut out, "📆 Day of Week Sales", &charts::bar_chart("Sales by Day of Week", &days));

    let mop: Vec<Point> = aggs
        .by_payment_method
        .iter()
        .map(|g| Point::new(&g.key, g.sales))
        .collect();
    section(&mut out, "💳 Payment Method Split", &charts::pie_chart("Sales by Payment Method", &mop));

    let limit = ctx.top_products_limit;
    let products: Vec<Point> = aggs
        .top_products
        .iter()
        .map(|p| Point::new(&p.product_name, p.sales).annotated(format_count(p.quantity)))
        .collect();
    let mut products_body = charts::horizontal_bar_chart(&format!("Top {} Products", limit), &products);
    products_body.push_str(&table(
        &["Product Name", "Sales", "Quantity"],
        aggs.top_products.iter().map(|p| {
            vec![
                escape(&p.product_name),
                format_thousands(p.sales),
                format_count(p.quantity),
            ]
        }),
    ));
    section(&mut out, &format!("🍔 Top {} Products by Sales", limit), &products_body);

    let customers: Vec<Point> = aggs
        .by_customer_type
        .iter()
        .map(|g| Point::new(&g.key, g.sales).annotated(format_thousands(g.sales)))
        .collect();
    let customer_title = format!("Sales by Customer Type ({})", ctx.customer_types.join(", "));
    section(
        &mut out,
        "🧑 Customer-wise Sales (Selected)",
        &charts::bar_chart(&customer_title, &customers),
    );

    let years: Vec<Point> = aggs
        .by_year
        .iter()
        .map(|y| Point::new(y.year.to_string(), y.sales))
        .collect();
    let mut years_body = charts::line_chart("Year-wise Sales", &years);
    years_body.push_str(&table(
        &["Year", "Sales"],
        aggs.by_year
            .iter()
            .map(|y| vec![y.year.to_string(), format_thousands(y.sales)]),
    ));
    section(&mut out, "📈 Year-wise Sales", &years_body);

    out
}

fn export_section(snapshot: &DashboardSnapshot, notice: Option<&ExportNotice>) -> String {
    let mut out = String::from(r#"<section><h3>Report</h3><form method="post" action="/report">"#);
    let _ = write!(
        out,
        r#"<input type="hidden" name="branch" value="{}"><input type="hidden" name="months_set" value="1">"#,
        escape(snapshot.filter.branch.as_param()),
    );
    for month in &snapshot.filter.months {
        let _ = write!(out, r#"<input type="hidden" name="month" value="{}">"#, escape(month));
    }
    out.push_str(r#"<button type="submit">📄 Generate PDF Report</button></form>"#);

    match notice {
        Some(ExportNotice::Generated(export)) => {
            let _ = write!(
                out,
                r#"<p><a href="{href}" download="{name}">📥 Click to Download Sales Report</a></p><div class="message success">✅ PDF report generated successfully.</div>"#,
                href = export.download_href,
                name = escape(&export.file_name),
            );
        }
        Some(ExportNotice::Failed(message)) => {
            let _ = write!(
                out,
                r#"<div class="message error">❌ Failed to generate PDF: {}</div>"#,
                escape(message)
            );
        }
        None => {}
    }
    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Aggregations, DashboardFilter, GroupTotal, Kpis};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            filter: DashboardFilter {
                branch: BranchSelection::Shop("Gulberg".into()),
                months: vec!["2024-01".into()],
            },
            branches: vec!["Gulberg".into(), "DHA & Co".into()],
            months: vec!["2024-01".into(), "2024-02".into()],
            kpis: Kpis {
                total_sales: Decimal::new(12345675, 1),
                total_quantity: 4200,
                ..Default::default()
            },
            aggregations: Aggregations {
                by_pos: vec![GroupTotal {
                    key: "POS-1".into(),
                    sales: Decimal::from(10),
                }],
                ..Default::default()
            },
        }
    }

    fn render(export: Option<&ExportNotice>) -> String {
        let snapshot = snapshot();
        let customer_types = vec!["Dine IN".to_string()];
        render_dashboard(&PageContext {
            title: "Sales Dashboard",
            snapshot: &snapshot,
            top_products_limit: 30,
            customer_types: &customer_types,
            export,
        })
    }

    #[test]
    fn test_page_filters_and_kpis() {
        let html = render(None);
        assert!(html.contains(r#"value="Gulberg" checked"#));
        assert!(html.contains("DHA &amp; Co"));
        assert!(html.contains(r#"name="month" value="2024-01" checked"#));
        assert!(html.contains(r#"name="month" value="2024-02">"#));
        assert!(html.contains("1,234,568"));
        assert!(html.contains("4,200"));
        assert!(html.contains("Top 30 Products by Sales"));
        assert!(!html.contains(r#"class="message"#));
    }

    #[test]
    fn test_page_export_success() {
        let notice = ExportNotice::Generated(ReportExport {
            file_name: "Sales_Report.pdf".into(),
            size_bytes: 3,
            generated_at: "2024-01-01 10:00".into(),
            download_href: "data:application/octet-stream;base64,JVBE".into(),
        });
        let html = render(Some(&notice));
        assert!(html.contains(r#"href="data:application/octet-stream;base64,JVBE" download="Sales_Report.pdf""#));
        assert!(html.contains("PDF report generated successfully"));
    }

    #[test]
    fn test_page_export_failure() {
        let notice = ExportNotice::Failed("Logo file not found: <logo>".into());
        let html = render(Some(&notice));
        assert!(html.contains("Failed to generate PDF: Logo file not found: &lt;logo&gt;"));
        assert!(!html.contains("download="));
    }
}
