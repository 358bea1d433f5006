//! Report columns grouped into charts over a shared date axis.
//!
//! Rendering is left to a [`ReportPort`](crate::ports::report_port::ReportPort)
//! implementation; this module only guarantees every column is aligned with
//! the date axis.

use chrono::NaiveDate;

use crate::domain::error::StrategiseError;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Annotation(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Annotation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportColumn {
    pub name: String,
    pub values: ColumnValues,
}

impl ReportColumn {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn annotation(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Annotation(values),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    /// Chart 0 always exists and holds the price columns.
    pub charts: Vec<Vec<ReportColumn>>,
}

impl Report {
    pub fn new(name: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            dates,
            charts: vec![Vec::new()],
        }
    }

    /// Add an empty chart and return its index.
    pub fn add_chart(&mut self) -> usize {
        self.charts.push(Vec::new());
        self.charts.len() - 1
    }

    /// Add `column` to `chart`, creating charts up to that index as needed.
    pub fn add_column(&mut self, column: ReportColumn, chart: usize) -> Result<(), StrategiseError> {
        if column.values.len() != self.dates.len() {
            return Err(StrategiseError::ReportColumnLength {
                column: column.name,
                expected: self.dates.len(),
                actual: column.values.len(),
            });
        }
        while self.charts.len() <= chart {
            self.charts.push(Vec::new());
        }
        self.charts[chart].push(column);
        Ok(())
    }

    /// All columns in chart order, paired with their chart index.
    pub fn columns(&self) -> impl Iterator<Item = (usize, &ReportColumn)> {
        self.charts
            .iter()
            .enumerate()
            .flat_map(|(i, chart)| chart.iter().map(move |c| (i, c)))
    }
}
