//! Export report use case

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::domain::error::InputError;
use crate::domain::session::{Session, SessionType};

/// Errors from the export use case
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to write report: {0}")]
    WriteFailed(String),
}

/// Filename contract for exported reports:
/// `SBDC_<Initial|FollowUp>_Report_<YYYYMMDD_HHMMSS>.md`
pub fn report_filename(session_type: SessionType, at: DateTime<Local>) -> String {
    format!(
        "SBDC_{}_Report_{}.md",
        session_type.export_tag(),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Use case writing the session's report to a markdown file
#[derive(Default)]
pub struct ExportReportUseCase;

impl ExportReportUseCase {
    /// Create a new use case instance
    pub fn new() -> Self {
        Self
    }

    /// Write the session's report into `dir`, creating it if needed.
    ///
    /// # Returns
    /// The path of the written file
    pub async fn execute(&self, session: &Session, dir: &Path) -> Result<PathBuf, ExportError> {
        if !session.has_report() {
            return Err(InputError::EmptyReport.into());
        }

        let path = dir.join(report_filename(session.session_type(), Local::now()));

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

        tokio::fs::write(&path, session.report())
            .await
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_for_initial_session() {
        let at = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            report_filename(SessionType::Initial, at),
            "SBDC_Initial_Report_20240115_103000.md"
        );
    }

    #[test]
    fn filename_for_follow_up_session() {
        let at = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            report_filename(SessionType::FollowUp, at),
            "SBDC_FollowUp_Report_20240115_103000.md"
        );
    }

    #[tokio::test]
    async fn execute_writes_report_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        session.edit_transcript("transcript".to_string()).unwrap();
        session.begin_generating().unwrap();
        session.complete_generation("# Report\n\nContent".to_string()).unwrap();

        let use_case = ExportReportUseCase::new();
        let path = use_case.execute(&session, dir.path()).await.unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("SBDC_Initial_Report_"));
        assert!(name.ends_with(".md"));

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "# Report\n\nContent");
    }

    #[tokio::test]
    async fn execute_rejects_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new();

        let use_case = ExportReportUseCase::new();
        let err = use_case.execute(&session, dir.path()).await.unwrap_err();

        assert!(matches!(err, ExportError::Input(InputError::EmptyReport)));
    }
}
