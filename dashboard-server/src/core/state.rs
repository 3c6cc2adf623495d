//! Shared request state

use std::sync::Arc;

use shared::error::AppResult;

use crate::core::Config;
use crate::dashboard::DashboardService;
use crate::db::{self, SalesCache, SalesRepository};
use crate::report::{PdfRenderer, ReportExporter, WkHtmlToPdf};

/// State cloned into every handler
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Loaded configuration |
/// | dashboard | Cached dataset plus snapshot computation |
/// | exporter | PDF report pipeline |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub dashboard: DashboardService,
    pub exporter: Arc<ReportExporter>,
}

impl ServerState {
    /// Assemble state from already-built parts
    pub fn new(config: Config, cache: SalesCache, renderer: Arc<dyn PdfRenderer>) -> Self {
        let dashboard = DashboardService::new(cache, config.aggregation.clone());
        let exporter = ReportExporter::new(config.report.clone(), config.title.clone(), renderer);
        Self {
            config: Arc::new(config),
            dashboard,
            exporter: Arc::new(exporter),
        }
    }

    /// Connect to the database, warm the cache and wire the wkhtmltopdf renderer
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let pool = db::connect(&config.database_url).await?;
        let cache = SalesCache::new(SalesRepository::new(pool), config.cache_ttl);
        let renderer = Arc::new(WkHtmlToPdf::new(config.report.renderer_path.clone()));
        let state = Self::new(config.clone(), cache, renderer);

        // fail at startup rather than on the first request
        let dataset = state.dashboard.cache().get().await?;
        if dataset.is_empty() {
            tracing::warn!("Fact table is empty, dashboard will show zeros");
        }

        Ok(state)
    }
}
