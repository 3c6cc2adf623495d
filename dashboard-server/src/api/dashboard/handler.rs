//! Dashboard Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use shared::error::{ApiResponse, AppResult};
use shared::models::DashboardSnapshot;

use crate::core::ServerState;
use crate::dashboard::DashboardParams;
use crate::render::{ExportNotice, PageContext, render_dashboard};

/// Raw query pairs; `month` may repeat
pub type FilterPairs = Vec<(String, String)>;

/// GET / - dashboard page
pub async fn page(
    State(state): State<ServerState>,
    Query(pairs): Query<FilterPairs>,
) -> AppResult<Html<String>> {
    let snapshot = state
        .dashboard
        .snapshot(DashboardParams::from_pairs(&pairs))
        .await?;
    Ok(Html(render_page(&state, &snapshot, None)))
}

/// GET /api/dashboard - snapshot as JSON
pub async fn snapshot(
    State(state): State<ServerState>,
    Query(pairs): Query<FilterPairs>,
) -> AppResult<Json<ApiResponse<DashboardSnapshot>>> {
    let snapshot = state
        .dashboard
        .snapshot(DashboardParams::from_pairs(&pairs))
        .await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// POST /api/dashboard/refresh - drop the cached fact table
pub async fn refresh(State(state): State<ServerState>) -> Json<ApiResponse<()>> {
    state.dashboard.cache().invalidate().await;
    Json(ApiResponse::ok())
}

pub(crate) fn render_page(
    state: &ServerState,
    snapshot: &DashboardSnapshot,
    export: Option<&ExportNotice>,
) -> String {
    render_dashboard(&PageContext {
        title: &state.config.title,
        snapshot,
        top_products_limit: state.config.aggregation.top_products_limit,
        customer_types: &state.config.aggregation.customer_types,
        export,
    })
}
