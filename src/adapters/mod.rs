pub mod csv_trade_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
pub mod json_report_adapter;
