//! Branch + month filter stage

use std::collections::HashSet;

use shared::models::{BranchSelection, DashboardFilter, SalesRecord};

use super::SalesDataset;

/// Fill in the defaults for whatever the caller left unspecified.
///
/// - no branch: the first branch of the dataset (`All` if there is none)
/// - no month set: every bucket present, in first-appearance order
///
/// An explicitly empty month set stays empty.
pub fn resolve(
    dataset: &SalesDataset,
    branch: Option<BranchSelection>,
    months: Option<Vec<String>>,
) -> DashboardFilter {
    let branch = branch.unwrap_or_else(|| {
        dataset
            .branches()
            .first()
            .map(|b| BranchSelection::Shop(b.clone()))
            .unwrap_or(BranchSelection::All)
    });
    let months = months.unwrap_or_else(|| dataset.months().to_vec());

    DashboardFilter { branch, months }
}

/// Records matching the branch selection whose month bucket is selected
pub fn apply<'a>(records: &'a [SalesRecord], filter: &DashboardFilter) -> Vec<&'a SalesRecord> {
    let months: HashSet<&str> = filter.months.iter().map(String::as_str).collect();
    if months.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| filter.branch.matches(&r.shop) && months.contains(r.year_month.as_str()))
        .collect()
}
