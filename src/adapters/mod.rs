//! Concrete adapter implementations for ports.

pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod marker_file_adapter;
pub mod portfolio_performance_adapter;
