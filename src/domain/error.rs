//! Domain error types.

/// Top-level error type for tradelog.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade source error: {reason}")]
    TradeSource { reason: String },

    #[error("CSV parse error in {file}: {reason}")]
    CsvParse { file: String, reason: String },

    #[error("report write error: {reason}")]
    ReportWrite { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. }
            | JournalError::ConfigMissing { .. }
            | JournalError::ConfigInvalid { .. } => 2,
            JournalError::TradeSource { .. } | JournalError::CsvParse { .. } => 3,
            JournalError::ReportWrite { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
