//! Per-request dashboard recomputation

use shared::error::AppResult;
use shared::models::{BranchSelection, DashboardSnapshot};

use super::{aggregator, filter, SalesDataset};
use crate::core::AggregationConfig;
use crate::db::SalesCache;

/// Filter parameters as they arrive from a query string or form.
///
/// Keys:
/// - `branch`: shop name, or `*` for every shop
/// - `month`: repeatable, one `YYYY-MM` bucket each
/// - `months`: comma-separated alternative to repeated `month`
/// - `months_set`: marker meaning "the month list was submitted", so an
///   empty selection is not mistaken for "use the default"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardParams {
    pub branch: Option<BranchSelection>,
    pub months: Option<Vec<String>>,
}

impl DashboardParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut branch = None;
        let mut months: Option<Vec<String>> = None;

        for (key, value) in pairs {
            match key.as_str() {
                "branch" if !value.is_empty() => {
                    branch = Some(BranchSelection::from_param(value));
                }
                "month" => push_months(&mut months, std::iter::once(value.as_str())),
                "months" => push_months(&mut months, value.split(',')),
                "months_set" => {
                    months.get_or_insert_with(Vec::new);
                }
                _ => {}
            }
        }

        Self { branch, months }
    }
}

fn push_months<'a>(months: &mut Option<Vec<String>>, values: impl Iterator<Item = &'a str>) {
    let list = months.get_or_insert_with(Vec::new);
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        if !list.iter().any(|m| m == value) {
            list.push(value.to_string());
        }
    }
}

/// Builds dashboard snapshots from the cached dataset
#[derive(Debug, Clone)]
pub struct DashboardService {
    cache: SalesCache,
    config: AggregationConfig,
}

impl DashboardService {
    pub fn new(cache: SalesCache, config: AggregationConfig) -> Self {
        Self { cache, config }
    }

    pub fn cache(&self) -> &SalesCache {
        &self.cache
    }

    /// Filter + aggregate for one request
    pub async fn snapshot(&self, params: DashboardParams) -> AppResult<DashboardSnapshot> {
        let dataset = self.cache.get().await?;
        Ok(build_snapshot(&dataset, params, &self.config))
    }
}

/// Pure snapshot computation over an already-loaded dataset
pub fn build_snapshot(
    dataset: &SalesDataset,
    params: DashboardParams,
    config: &AggregationConfig,
) -> DashboardSnapshot {
    let filter = filter::resolve(dataset, params.branch, params.months);
    let rows = filter::apply(dataset.records(), &filter);

    tracing::debug!(
        branch = filter.branch.as_param(),
        months = filter.months.len(),
        rows = rows.len(),
        "Dashboard filter applied"
    );

    DashboardSnapshot {
        kpis: aggregator::kpis(&rows),
        aggregations: aggregator::aggregate(&rows, config),
        branches: dataset.branches().to_vec(),
        months: dataset.months().to_vec(),
        filter,
    }
}
