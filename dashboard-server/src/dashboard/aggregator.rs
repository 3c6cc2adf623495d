//! KPIs and grouped sums over a filtered record set
//!
//! Every function is pure: same rows in, same numbers out. Sums are exact
//! `Decimal` arithmetic, so each grouping adds up to the KPI total it splits.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::*;
use shared::models::{
    Aggregations, GroupTotal, Kpis, MonthlySales, ProductSales, SalesRecord, YearlySales,
};

use crate::core::AggregationConfig;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Scalar KPIs
pub fn kpis(rows: &[&SalesRecord]) -> Kpis {
    let mut kpis = Kpis::default();
    let mut receipts: HashMap<&str, Decimal> = HashMap::new();

    for r in rows {
        kpis.total_sales += r.sales;
        kpis.total_quantity += r.quantity;
        kpis.total_sales_with_tax += r.sales_with_tax;
        kpis.gross_margin += r.gross_margin;
        *receipts.entry(r.receipt.as_str()).or_default() += r.sales;
    }

    kpis.record_count = rows.len();
    kpis.receipt_count = receipts.len();
    if !receipts.is_empty() {
        let sum: Decimal = receipts.values().copied().sum();
        kpis.avg_sales_per_receipt = (sum / Decimal::from(receipts.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }
    kpis
}

/// Sum `sales` per key, ordered by key
fn sum_by_key<'a, F>(rows: &[&'a SalesRecord], key: F) -> BTreeMap<&'a str, Decimal>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut sums = BTreeMap::new();
    for &r in rows {
        *sums.entry(key(r)).or_insert(Decimal::ZERO) += r.sales;
    }
    sums
}

fn into_totals(sums: BTreeMap<&str, Decimal>) -> Vec<GroupTotal> {
    sums.into_iter()
        .map(|(key, sales)| GroupTotal {
            key: key.to_string(),
            sales,
        })
        .collect()
}

/// Month-wise `sales` and `sales_amount`, ordered by month
pub fn sales_by_month(rows: &[&SalesRecord]) -> Vec<MonthlySales> {
    let mut months: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for r in rows {
        let entry = months.entry(r.year_month.as_str()).or_default();
        entry.0 += r.sales;
        entry.1 += r.sales_amount;
    }
    months
        .into_iter()
        .map(|(month, (sales, sales_amount))| MonthlySales {
            month: month.to_string(),
            sales,
            sales_amount,
        })
        .collect()
}

pub fn sales_by_pos(rows: &[&SalesRecord]) -> Vec<GroupTotal> {
    into_totals(sum_by_key(rows, |r| r.pos.as_str()))
}

/// Day-of-week sums, Monday first; unrecognised labels go last
pub fn sales_by_day(rows: &[&SalesRecord]) -> Vec<GroupTotal> {
    let mut totals = into_totals(sum_by_key(rows, |r| r.day.as_str()));
    // stable sort keeps the alphabetical order among non-weekday labels
    totals.sort_by_key(|t| weekday_rank(&t.key));
    totals
}

fn weekday_rank(label: &str) -> usize {
    WEEKDAYS
        .iter()
        .position(|d| d.eq_ignore_ascii_case(label.trim()))
        .unwrap_or(WEEKDAYS.len())
}

pub fn sales_by_payment_method(rows: &[&SalesRecord]) -> Vec<GroupTotal> {
    into_totals(sum_by_key(rows, |r| r.mop.as_str()))
}

/// Top `limit` products by sales, ties broken by name
pub fn top_products(rows: &[&SalesRecord], limit: usize) -> Vec<ProductSales> {
    let mut products: HashMap<&str, (Decimal, i64)> = HashMap::new();
    for r in rows {
        let entry = products.entry(r.product_name.as_str()).or_default();
        entry.0 += r.sales;
        entry.1 += r.quantity;
    }

    let mut ranked: Vec<ProductSales> = products
        .into_iter()
        .map(|(name, (sales, quantity))| ProductSales {
            product_name: name.to_string(),
            sales,
            quantity,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.sales
            .cmp(&a.sales)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    ranked.truncate(limit);
    ranked
}

/// Customer-type sums restricted to the allow-list
pub fn sales_by_customer_type(rows: &[&SalesRecord], allowed: &[String]) -> Vec<GroupTotal> {
    let allowed_rows: Vec<&SalesRecord> = rows
        .iter()
        .copied()
        .filter(|r| allowed.iter().any(|a| a == &r.customer_name))
        .collect();
    into_totals(sum_by_key(&allowed_rows, |r| r.customer_name.as_str()))
}

pub fn sales_by_year(rows: &[&SalesRecord]) -> Vec<YearlySales> {
    let mut years: BTreeMap<i32, Decimal> = BTreeMap::new();
    for r in rows {
        *years.entry(r.year).or_insert(Decimal::ZERO) += r.sales;
    }
    years
        .into_iter()
        .map(|(year, sales)| YearlySales { year, sales })
        .collect()
}

pub fn sales_by_branch(rows: &[&SalesRecord]) -> Vec<GroupTotal> {
    into_totals(sum_by_key(rows, |r| r.shop.as_str()))
}

/// Every grouping the dashboard and the report show
pub fn aggregate(rows: &[&SalesRecord], config: &AggregationConfig) -> Aggregations {
    Aggregations {
        by_month: sales_by_month(rows),
        by_pos: sales_by_pos(rows),
        by_day: sales_by_day(rows),
        by_payment_method: sales_by_payment_method(rows),
        top_products: top_products(rows, config.top_products_limit),
        by_customer_type: sales_by_customer_type(rows, &config.customer_types),
        by_year: sales_by_year(rows),
        by_branch: sales_by_branch(rows),
    }
}
