//! CSV report writer.
//!
//! One file per (asset, strategy): a `Date` column followed by every report
//! column, each headed `{chart}:{column}`.

use std::fs;
use std::path::PathBuf;

use crate::domain::error::StrategiseError;
use crate::domain::filename::clean_filename;
use crate::domain::report::{ColumnValues, Report};
use crate::domain::snapshot::format_date;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter {
    report_dir: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(report_dir: PathBuf) -> Self {
        Self { report_dir }
    }

    pub fn report_path(&self, asset: &str, strategy: &str) -> PathBuf {
        self.report_dir.join(format!(
            "{}--{}.csv",
            clean_filename(asset),
            clean_filename(strategy)
        ))
    }
}

fn csv_error(e: csv::Error) -> StrategiseError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StrategiseError::Io(io),
        other => StrategiseError::Io(std::io::Error::other(format!("{other:?}"))),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, asset: &str, report: &Report) -> Result<PathBuf, StrategiseError> {
        fs::create_dir_all(&self.report_dir)?;
        let path = self.report_path(asset, &report.name);
        let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;

        let columns: Vec<_> = report.columns().collect();

        let mut header = vec!["Date".to_string()];
        header.extend(
            columns
                .iter()
                .map(|(chart, column)| format!("{chart}:{}", column.name)),
        );
        writer.write_record(&header).map_err(csv_error)?;

        for (row, date) in report.dates.iter().enumerate() {
            let mut record = Vec::with_capacity(columns.len() + 1);
            record.push(format_date(*date));
            for (_, column) in &columns {
                record.push(match &column.values {
                    ColumnValues::Numeric(values) => values[row].to_string(),
                    ColumnValues::Annotation(values) => values[row].clone(),
                });
            }
            writer.write_record(&record).map_err(csv_error)?;
        }

        writer.flush()?;
        tracing::debug!(path = %path.display(), rows = report.dates.len(), "wrote report");
        Ok(path)
    }
}
