//! Report rendering port trait.

use crate::domain::error::JournalError;
use crate::domain::report::MetricsReport;

/// Port for rendering a computed metrics report.
pub trait ReportPort {
    /// Render the report as a string in the adapter's format.
    fn render(&self, report: &MetricsReport) -> Result<String, JournalError>;

    /// Default implementation: renders and writes to `output_path`.
    fn write(&self, report: &MetricsReport, output_path: &str) -> Result<(), JournalError> {
        let rendered = self.render(report)?;
        std::fs::write(output_path, rendered).map_err(|e| JournalError::ReportWrite {
            reason: format!("failed to write {}: {}", output_path, e),
        })
    }
}
