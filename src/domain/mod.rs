//! Core domain types and logic.

pub mod trade;
pub mod validation;
pub mod metrics;
pub mod report;
pub mod money;
pub mod config_validation;
pub mod error;
