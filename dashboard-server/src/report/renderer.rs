//! HTML-to-PDF conversion

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::ExportError;

/// Converts an HTML document into a PDF file at `output`
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, output: &Path) -> Result<(), ExportError>;
}

/// Pipes HTML into an external `wkhtmltopdf` process
#[derive(Debug, Clone)]
pub struct WkHtmlToPdf {
    executable: PathBuf,
}

impl WkHtmlToPdf {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait]
impl PdfRenderer for WkHtmlToPdf {
    async fn render(&self, html: &str, output: &Path) -> Result<(), ExportError> {
        let mut child = Command::new(&self.executable)
            .arg("--quiet")
            .arg("--encoding")
            .arg("utf-8")
            .arg("-")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => ExportError::RendererNotFound {
                    path: self.executable.clone(),
                },
                _ => ExportError::RenderFailed(format!("cannot start renderer: {}", e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| ExportError::RenderFailed(format!("cannot send HTML: {}", e)))?;
            // closing stdin tells the renderer the document is complete
            drop(stdin);
        }

        let result = child
            .wait_with_output()
            .await
            .map_err(|e| ExportError::RenderFailed(e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let detail = stderr.trim();
            return Err(ExportError::RenderFailed(if detail.is_empty() {
                result.status.to_string()
            } else {
                format!("{} ({})", result.status, detail)
            }));
        }

        Ok(())
    }
}
