//! Loaded fact table with its distinct branches and month buckets

use std::collections::HashSet;
use std::time::Instant;

use shared::models::SalesRecord;

/// The full fact table as loaded, immutable once built
#[derive(Debug, Clone)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
    branches: Vec<String>,
    months: Vec<String>,
    loaded_at: Instant,
}

impl SalesDataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        let branches = distinct_in_order(records.iter().map(|r| r.shop.as_str()));
        let months = distinct_in_order(records.iter().map(|r| r.year_month.as_str()));

        Self {
            records,
            branches,
            months,
            loaded_at: Instant::now(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Distinct shop names in first-appearance order
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// Distinct `YYYY-MM` buckets in first-appearance order
    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> Instant {
        self.loaded_at
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(String::from)
        .collect()
}
