use std::path::PathBuf;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Everything that can stop a PDF export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Logo file not found: {}", .path.display())]
    LogoNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF renderer not found: {}", .path.display())]
    RendererNotFound { path: PathBuf },

    #[error("PDF renderer failed: {0}")]
    RenderFailed(String),

    #[error("Cannot write report to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::LogoNotFound { .. } => ErrorCode::LogoNotFound,
            Self::RendererNotFound { .. } => ErrorCode::RendererNotFound,
            Self::RenderFailed(_) => ErrorCode::RenderFailed,
            Self::Write { .. } => ErrorCode::ReportWriteFailed,
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_codes_and_messages() {
        let err = ExportError::LogoNotFound {
            path: PathBuf::from("assets/logo.png"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.code(), ErrorCode::LogoNotFound);
        assert_eq!(err.to_string(), "Logo file not found: assets/logo.png");

        let app: AppError = ExportError::RenderFailed("exit status 1".into()).into();
        assert_eq!(app.code, ErrorCode::RenderFailed);
        assert_eq!(app.message, "PDF renderer failed: exit status 1");
    }
}
