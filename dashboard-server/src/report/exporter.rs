//! PDF export pipeline: logo, HTML, renderer, download link

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::models::{DashboardSnapshot, ReportExport};
use shared::util::now_local_minutes;
use tokio::sync::Mutex;

use super::template::{ReportContent, render_report_html};
use super::{ExportError, PdfRenderer};
use crate::core::ReportConfig;
use crate::utils::logger::REPORT_TARGET;

/// Produces the PDF report for a dashboard snapshot
pub struct ReportExporter {
    config: ReportConfig,
    title: String,
    renderer: Arc<dyn PdfRenderer>,
    /// Every export shares `output_path`; held from render to read-back
    output_lock: Mutex<()>,
}

impl ReportExporter {
    pub fn new(config: ReportConfig, title: impl Into<String>, renderer: Arc<dyn PdfRenderer>) -> Self {
        Self {
            config,
            title: title.into(),
            renderer,
            output_lock: Mutex::new(()),
        }
    }

    /// Render, write and read back the report.
    ///
    /// Nothing is returned unless every step succeeded.
    pub async fn export(&self, snapshot: &DashboardSnapshot) -> Result<ReportExport, ExportError> {
        let logo_path = &self.config.logo_path;
        let logo = tokio::fs::read(logo_path)
            .await
            .map_err(|source| ExportError::LogoNotFound {
                path: logo_path.clone(),
                source,
            })?;
        let logo_base64 = STANDARD.encode(&logo);

        let generated_at = now_local_minutes();
        let html = render_report_html(&ReportContent {
            title: &self.title,
            brand: &self.config.brand,
            currency_label: &self.config.currency_label,
            generated_at: &generated_at,
            logo_base64: &logo_base64,
            kpis: &snapshot.kpis,
            aggregations: &snapshot.aggregations,
        });

        let output = &self.config.output_path;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| write_error(output, source))?;
        }

        let pdf = {
            let _guard = self.output_lock.lock().await;
            self.renderer.render(&html, output).await?;
            tokio::fs::read(output)
                .await
                .map_err(|source| write_error(output, source))?
        };

        tracing::info!(
            target: REPORT_TARGET,
            branch = snapshot.filter.branch.as_param(),
            months = snapshot.filter.months.len(),
            path = %output.display(),
            size_bytes = pdf.len(),
            "PDF report generated"
        );

        Ok(ReportExport {
            file_name: self.config.file_name.clone(),
            size_bytes: pdf.len(),
            generated_at,
            download_href: format!("data:application/octet-stream;base64,{}", STANDARD.encode(&pdf)),
        })
    }
}

fn write_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Write {
        path: path.to_path_buf(),
        source,
    }
}

impl std::fmt::Debug for ReportExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportExporter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
