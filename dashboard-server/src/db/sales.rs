//! Fact table loader

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult};
use shared::models::SalesRecord;
use sqlx::SqlitePool;

use super::sqlx_err_to_app;

/// The one query the dashboard issues.
///
/// Columns are cast so that SQLite's dynamic typing cannot surprise the
/// decoder (e.g. an integer stored in a money column).
pub const FACT_QUERY: &str = r#"
    SELECT
        CAST(Fact_ID AS INTEGER) AS fact_id,
        CAST(SaleLineItemID AS INTEGER) AS sale_line_item_id,
        CAST(Receipt AS TEXT) AS receipt,
        CAST(Shop_ID AS INTEGER) AS shop_id,
        CAST(Shop AS TEXT) AS shop,
        CAST(POS AS TEXT) AS pos,
        CAST(Date AS TEXT) AS date,
        CAST(Time AS TEXT) AS time,
        CAST(Day AS TEXT) AS day,
        CAST([Customer Name] AS TEXT) AS customer_name,
        CAST(Product_Id AS INTEGER) AS product_id,
        CAST(Product_code AS TEXT) AS product_code,
        CAST([Product Name] AS TEXT) AS product_name,
        Technical_details AS technical_details,
        CAST([Retail Price] AS REAL) AS retail_price,
        CAST(Quantity AS INTEGER) AS quantity,
        CAST(Sales AS REAL) AS sales,
        CAST([Sales Amount] AS REAL) AS sales_amount,
        CAST(Tax AS REAL) AS tax,
        CAST([Sales + Tax] AS REAL) AS sales_with_tax,
        TaxCode AS tax_code,
        CAST(Cost AS REAL) AS cost,
        CAST([Gross Margin (on Sales Amt)] AS REAL) AS gross_margin,
        CAST(Cash_amt AS REAL) AS cash_amount,
        CAST(Card_amt AS REAL) AS card_amount,
        CAST(MOP AS TEXT) AS mop,
        CAST([Is Discounted] AS INTEGER) AS is_discounted,
        discount_name,
        CAST(Load_Date AS TEXT) AS load_date
    FROM Fact_Table
    ORDER BY Fact_ID
"#;

/// Raw fact row as SQLite returns it
#[derive(Debug, sqlx::FromRow)]
struct FactRow {
    fact_id: i64,
    sale_line_item_id: i64,
    receipt: String,
    shop_id: i64,
    shop: String,
    pos: String,
    date: String,
    time: String,
    day: String,
    customer_name: String,
    product_id: i64,
    product_code: String,
    product_name: String,
    technical_details: Option<String>,
    retail_price: f64,
    quantity: i64,
    sales: f64,
    sales_amount: f64,
    tax: f64,
    sales_with_tax: f64,
    tax_code: Option<String>,
    cost: f64,
    gross_margin: f64,
    cash_amount: f64,
    card_amount: f64,
    mop: String,
    is_discounted: i64,
    discount_name: Option<String>,
    load_date: String,
}

impl FactRow {
    fn into_record(self) -> AppResult<SalesRecord> {
        let date = parse_date("Date", &self.date)?;
        let load_date = parse_datetime("Load_Date", &self.load_date)?;

        Ok(SalesRecord {
            fact_id: self.fact_id,
            sale_line_item_id: self.sale_line_item_id,
            receipt: self.receipt,
            shop_id: self.shop_id,
            shop: self.shop,
            pos: self.pos,
            date,
            time: self.time,
            day: self.day,
            customer_name: self.customer_name,
            product_id: self.product_id,
            product_code: self.product_code,
            product_name: self.product_name,
            technical_details: self.technical_details,
            retail_price: to_money("Retail Price", self.retail_price)?,
            quantity: self.quantity,
            sales: to_money("Sales", self.sales)?,
            sales_amount: to_money("Sales Amount", self.sales_amount)?,
            tax: to_money("Tax", self.tax)?,
            sales_with_tax: to_money("Sales + Tax", self.sales_with_tax)?,
            tax_code: self.tax_code,
            cost: to_money("Cost", self.cost)?,
            gross_margin: to_money("Gross Margin (on Sales Amt)", self.gross_margin)?,
            cash_amount: to_money("Cash_amt", self.cash_amount)?,
            card_amount: to_money("Card_amt", self.card_amount)?,
            mop: self.mop,
            is_discounted: self.is_discounted != 0,
            discount_name: self.discount_name,
            load_date,
            year_month: String::new(),
            year: 0,
        }
        .with_calendar())
    }
}

/// Reads the fact table
#[derive(Clone, Debug)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load every fact row, parse dates and derive calendar fields
    pub async fn load_all(&self) -> AppResult<Vec<SalesRecord>> {
        let rows: Vec<FactRow> = sqlx::query_as(FACT_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_err_to_app)?;

        let records = rows
            .into_iter()
            .map(FactRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!(rows = records.len(), "Fact table loaded");
        Ok(records)
    }
}

/// Money columns arrive as f64; NaN/inf means the row is corrupt
fn to_money(column: &str, value: f64) -> AppResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(4))
        .ok_or_else(|| {
            AppError::data_load(format!("Non-finite value in column {}", column))
                .with_detail("column", column)
        })
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Parse a date column; datetime text keeps only the date part
pub fn parse_date(column: &str, value: &str) -> AppResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_datetime(column, trimmed).map(|dt| dt.date())
}

/// Parse a datetime column; a bare date means midnight
pub fn parse_datetime(column: &str, value: &str) -> AppResult<NaiveDateTime> {
    let trimmed = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| AppError::invalid_date(column, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use shared::ErrorCode;

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("Date", "2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("Date", " 2024-01-15 ").unwrap(), expected);
        assert_eq!(parse_date("Date", "2024-01-15 13:45:00").unwrap(), expected);
        assert_eq!(parse_date("Date", "2024-01-15 13:45:00.123").unwrap(), expected);
        assert_eq!(parse_date("Date", "2024-01-15T13:45:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_datetime_bare_date_is_midnight() {
        let dt = parse_datetime("Load_Date", "2024-02-01").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_parse_datetime_minutes_only() {
        let dt = parse_datetime("Load_Date", "2024-02-01 08:30").unwrap();
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("Date", "15/01/2024").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDate);

        let err = parse_datetime("Load_Date", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDate);
    }

    #[test]
    fn test_to_money_rejects_nan() {
        assert!(to_money("Sales", f64::NAN).is_err());
        assert_eq!(to_money("Sales", 12.5).unwrap(), Decimal::new(125, 1));
    }
}
