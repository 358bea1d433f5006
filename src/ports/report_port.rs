//! Report output port.

use std::path::PathBuf;

use crate::domain::error::StrategiseError;
use crate::domain::report::Report;

pub trait ReportPort {
    /// Write `report` for `asset`, returning where it went.
    fn write(&self, asset: &str, report: &Report) -> Result<PathBuf, StrategiseError>;
}
