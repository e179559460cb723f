//! JSON report adapter implementing ReportPort.
//!
//! Serializes the full [`MetricsReport`] for charting and export
//! collaborators.

use crate::domain::error::JournalError;
use crate::domain::report::MetricsReport;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &MetricsReport) -> Result<String, JournalError> {
        serde_json::to_string_pretty(report).map_err(|e| JournalError::ReportWrite {
            reason: format!("JSON serialization failed: {}", e),
        })
    }
}
