//! Report configuration validation.
//!
//! Validates all `[report]` fields before a report run.

use crate::domain::error::JournalError;
use crate::ports::config_port::ConfigPort;

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_format(config)?;
    validate_timezone_offset(config)?;
    validate_currency_symbol(config)?;
    Ok(())
}

fn validate_format(config: &dyn ConfigPort) -> Result<(), JournalError> {
    if let Some(format) = config.get_string("report", "format") {
        if format != "text" && format != "json" {
            return Err(JournalError::ConfigInvalid {
                section: "report".to_string(),
                key: "format".to_string(),
                reason: "format must be text or json".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_timezone_offset(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let offset = config.get_int("report", "timezone_offset_minutes", 0);
    // UTC-14 through UTC+14 covers every civil timezone.
    if !(-840..=840).contains(&offset) {
        return Err(JournalError::ConfigInvalid {
            section: "report".to_string(),
            key: "timezone_offset_minutes".to_string(),
            reason: "offset must be between -840 and 840 minutes".to_string(),
        });
    }
    Ok(())
}

fn validate_currency_symbol(config: &dyn ConfigPort) -> Result<(), JournalError> {
    if let Some(symbol) = config.get_string("report", "currency_symbol") {
        if symbol.trim().is_empty() {
            return Err(JournalError::ConfigInvalid {
                section: "report".to_string(),
                key: "currency_symbol".to_string(),
                reason: "currency_symbol must not be empty".to_string(),
            });
        }
    }
    Ok(())
}
