//! Report Handlers

use axum::{
    Form, Json,
    extract::{Query, State},
    response::Html,
};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{DashboardSnapshot, ReportExport};

use crate::api::dashboard::handler::{FilterPairs, render_page};
use crate::core::ServerState;
use crate::dashboard::DashboardParams;
use crate::render::ExportNotice;
use crate::report::ExportError;
use crate::utils::logger::REPORT_TARGET;

async fn export(state: &ServerState, snapshot: &DashboardSnapshot) -> Result<ReportExport, ExportError> {
    state.exporter.export(snapshot).await.inspect_err(|e| {
        tracing::warn!(
            target: REPORT_TARGET,
            code = %e.code(),
            error = %e,
            "PDF report generation failed"
        );
    })
}

/// POST /report - export, then render the dashboard with the outcome
///
/// Export failures do not fail the request; the page shows the message.
pub async fn export_page(
    State(state): State<ServerState>,
    Form(pairs): Form<FilterPairs>,
) -> AppResult<Html<String>> {
    let snapshot = state
        .dashboard
        .snapshot(DashboardParams::from_pairs(&pairs))
        .await?;

    let notice = match export(&state, &snapshot).await {
        Ok(report) => ExportNotice::Generated(report),
        Err(e) => ExportNotice::Failed(e.to_string()),
    };

    Ok(Html(render_page(&state, &snapshot, Some(&notice))))
}

/// POST /api/report - export as JSON; filters come from the query string
pub async fn export_json(
    State(state): State<ServerState>,
    Query(pairs): Query<FilterPairs>,
) -> AppResult<Json<ApiResponse<ReportExport>>> {
    let snapshot = state
        .dashboard
        .snapshot(DashboardParams::from_pairs(&pairs))
        .await?;

    let report = export(&state, &snapshot).await.map_err(AppError::from)?;
    Ok(Json(ApiResponse::success_with_message(
        "PDF report generated successfully",
        report,
    )))
}
