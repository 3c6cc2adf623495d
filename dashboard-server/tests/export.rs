mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::*;
use dashboard_server::DashboardParams;
use shared::models::{BranchSelection, ReportExport};
use dashboard_server::report::{ExportError, ReportExporter, WkHtmlToPdf};
use shared::ErrorCode;

#[tokio::test]
async fn test_export_writes_pdf_and_builds_download_link() {
    let dir = tempfile::tempdir().unwrap();
    write_logo(dir.path());
    let config = test_config(dir.path());
    let output = config.report.output_path.clone();
    let renderer = Arc::new(StubRenderer::default());
    let state = state_with(seeded_pool(&two_branch_facts()).await, config, renderer.clone());

    let snapshot = state.dashboard.snapshot(DashboardParams::default()).await.unwrap();
    let report = state.exporter.export(&snapshot).await.unwrap();

    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(std::fs::read(&output).unwrap(), FAKE_PDF);
    assert_eq!(report.file_name, "Sales_Report.pdf");
    assert_eq!(report.size_bytes, FAKE_PDF.len());
    assert_eq!(report.generated_at.len(), "2024-01-01 00:00".len());

    let encoded = report
        .download_href
        .strip_prefix("data:application/octet-stream;base64,")
        .unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), FAKE_PDF);
}

#[tokio::test]
async fn test_missing_logo_skips_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Arc::new(StubRenderer::default());
    let state = state_with(
        seeded_pool(&two_branch_facts()).await,
        test_config(dir.path()),
        renderer.clone(),
    );

    let snapshot = state.dashboard.snapshot(DashboardParams::default()).await.unwrap();
    let err = state.exporter.export(&snapshot).await.unwrap_err();

    assert!(matches!(err, ExportError::LogoNotFound { .. }));
    assert_eq!(err.code(), ErrorCode::LogoNotFound);
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_renderer_failure_leaves_no_result() {
    let dir = tempfile::tempdir().unwrap();
    write_logo(dir.path());
    let config = test_config(dir.path());
    let output = config.report.output_path.clone();
    let state = state_with(seeded_pool(&two_branch_facts()).await, config, Arc::new(FailingRenderer));

    let snapshot = state.dashboard.snapshot(DashboardParams::default()).await.unwrap();
    let err = state.exporter.export(&snapshot).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::RenderFailed);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_wkhtmltopdf_binary() {
    let dir = tempfile::tempdir().unwrap();
    write_logo(dir.path());
    let config = test_config(dir.path());
    let renderer = Arc::new(WkHtmlToPdf::new(config.report.renderer_path.clone()));
    let exporter = ReportExporter::new(config.report.clone(), config.title.clone(), renderer);
    let state = state_with(
        seeded_pool(&two_branch_facts()).await,
        config,
        Arc::new(StubRenderer::default()),
    );

    let snapshot = state.dashboard.snapshot(DashboardParams::default()).await.unwrap();
    let err = exporter.export(&snapshot).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::RendererNotFound);
}

fn decoded_body(report: &ReportExport) -> String {
    let encoded = report
        .download_href
        .strip_prefix("data:application/octet-stream;base64,")
        .unwrap();
    String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
}

#[tokio::test]
async fn test_concurrent_exports_keep_their_own_report() {
    let dir = tempfile::tempdir().unwrap();
    write_logo(dir.path());
    let renderer = Arc::new(SlowEchoRenderer {
        delay: Duration::from_millis(80),
    });
    let state = state_with(
        seeded_pool(&two_branch_facts()).await,
        test_config(dir.path()),
        renderer,
    );

    let branch = |name: &str| DashboardParams {
        branch: Some(BranchSelection::Shop(name.into())),
        months: None,
    };
    let snapshot_a = state.dashboard.snapshot(branch("A")).await.unwrap();
    let snapshot_b = state.dashboard.snapshot(branch("B")).await.unwrap();

    let (report_a, report_b) = tokio::join!(state.exporter.export(&snapshot_a), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        state.exporter.export(&snapshot_b).await
    });

    let body_a = decoded_body(&report_a.unwrap());
    let body_b = decoded_body(&report_b.unwrap());
    assert!(body_a.contains("<strong>Total Sales:</strong> PKR 150</div>"));
    assert!(body_b.contains("<strong>Total Sales:</strong> PKR 30</div>"));
}
