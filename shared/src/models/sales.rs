//! Sales fact model (one row per sale line item)

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel used in query strings and forms for "every branch"
pub const ALL_BRANCHES: &str = "*";

/// One sale line item from the fact table
///
/// Money columns are exact decimals so grouped sums always add up to the
/// totals they were split from. `year_month` and `year` are derived from
/// `date` by [`SalesRecord::with_calendar`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub fact_id: i64,
    pub sale_line_item_id: i64,
    pub receipt: String,
    pub shop_id: i64,
    /// Branch name
    pub shop: String,
    /// POS terminal
    pub pos: String,
    pub date: NaiveDate,
    pub time: String,
    /// Day-of-week label as stored in the fact table
    pub day: String,
    /// Customer/channel label (e.g. "Dine IN", "Takeaway")
    pub customer_name: String,
    pub product_id: i64,
    pub product_code: String,
    pub product_name: String,
    pub technical_details: Option<String>,
    pub retail_price: Decimal,
    pub quantity: i64,
    pub sales: Decimal,
    pub sales_amount: Decimal,
    pub tax: Decimal,
    pub sales_with_tax: Decimal,
    pub tax_code: Option<String>,
    pub cost: Decimal,
    pub gross_margin: Decimal,
    pub cash_amount: Decimal,
    pub card_amount: Decimal,
    /// Method of payment
    pub mop: String,
    pub is_discounted: bool,
    pub discount_name: Option<String>,
    pub load_date: NaiveDateTime,

    /// `YYYY-MM` bucket derived from `date`
    pub year_month: String,
    /// Calendar year derived from `date`
    pub year: i32,
}

impl SalesRecord {
    /// Recompute the derived calendar fields from `date`
    pub fn with_calendar(mut self) -> Self {
        self.year_month = year_month_of(self.date);
        self.year = self.date.year();
        self
    }
}

/// Format a date as its `YYYY-MM` bucket
pub fn year_month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Which branch(es) the dashboard is filtered to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum BranchSelection {
    /// Every shop, filtered only by month
    All,
    /// A single shop by name
    Shop(String),
}

impl BranchSelection {
    /// Parse a query/form value; [`ALL_BRANCHES`] selects every shop
    pub fn from_param(value: &str) -> Self {
        if value == ALL_BRANCHES {
            Self::All
        } else {
            Self::Shop(value.to_string())
        }
    }

    /// Value used in query strings and form fields
    pub fn as_param(&self) -> &str {
        match self {
            Self::All => ALL_BRANCHES,
            Self::Shop(name) => name,
        }
    }

    /// Whether a record's shop passes this selection
    pub fn matches(&self, shop: &str) -> bool {
        match self {
            Self::All => true,
            Self::Shop(name) => name == shop,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All branches",
            Self::Shop(name) => name,
        }
    }
}
