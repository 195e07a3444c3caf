//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod result_cache;
pub mod tables;
pub mod text_report_adapter;
pub mod trade_log_adapter;
