//! Composite strategies: a fixed OR tree over the MACD, Awesome Oscillator
//! and RSI leaves, normalized into edge-triggered decisions.
//!
//! Two shapes exist:
//!
//! - [`CompositeShape::FlatOr`] combines MACD and AO. RSI is charted in the
//!   report but does not vote.
//! - [`CompositeShape::NestedOr`] combines (fast MACD OR AO) with RSI.
//!
//! Reports chart each leaf's raw outcomes next to its indicator, so a leaf
//! column marks every bar the leaf votes on; only the combined column is
//! edge-triggered.

use std::sync::Arc;

use crate::domain::action::{annotations, normalize_stream, Action};
use crate::domain::error::StrategiseError;
use crate::domain::indicator::macd::macd_columns;
use crate::domain::indicator::ulcer_index::{self, calculate_ulcer_index};
use crate::domain::report::{Report, ReportColumn};
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

use super::{AwesomeOscillatorStrategy, MacdStrategy, OrStrategy, RsiStrategy, Strategy};

pub const DEFAULT_BUY_AT: f64 = 30.0;
pub const DEFAULT_SELL_AT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeShape {
    FlatOr,
    NestedOr,
}

pub struct CompositeStrategy {
    shape: CompositeShape,
    macd: Arc<MacdStrategy>,
    awesome_oscillator: Arc<AwesomeOscillatorStrategy>,
    rsi: Arc<RsiStrategy>,
    tree: OrStrategy,
}

impl CompositeStrategy {
    pub fn flat_or() -> Self {
        Self::flat_or_with(DEFAULT_BUY_AT, DEFAULT_SELL_AT)
    }

    pub fn flat_or_with(buy_at: f64, sell_at: f64) -> Self {
        let macd = Arc::new(MacdStrategy::new());
        let awesome_oscillator = Arc::new(AwesomeOscillatorStrategy::new());
        let rsi = Arc::new(RsiStrategy::with(buy_at, sell_at));

        let tree = OrStrategy::new("MACD or AO", macd.clone(), awesome_oscillator.clone());

        Self {
            shape: CompositeShape::FlatOr,
            macd,
            awesome_oscillator,
            rsi,
            tree,
        }
    }

    pub fn nested_or() -> Self {
        Self::nested_or_with(DEFAULT_BUY_AT, DEFAULT_SELL_AT)
    }

    pub fn nested_or_with(buy_at: f64, sell_at: f64) -> Self {
        let macd = Arc::new(MacdStrategy::fast());
        let awesome_oscillator = Arc::new(AwesomeOscillatorStrategy::new());
        let rsi = Arc::new(RsiStrategy::with(buy_at, sell_at));

        let momentum = OrStrategy::new("Fast MACD or AO", macd.clone(), awesome_oscillator.clone());
        let tree = OrStrategy::new("Momentum or RSI", Arc::new(momentum), rsi.clone());

        Self {
            shape: CompositeShape::NestedOr,
            macd,
            awesome_oscillator,
            rsi,
            tree,
        }
    }

    pub fn shape(&self) -> CompositeShape {
        self.shape
    }

    pub fn tree(&self) -> &OrStrategy {
        &self.tree
    }

    /// The individual signals, each usable on its own.
    pub fn leaves(&self) -> [Arc<dyn Strategy>; 3] {
        [
            self.macd.clone(),
            self.awesome_oscillator.clone(),
            self.rsi.clone(),
        ]
    }
}

impl Strategy for CompositeStrategy {
    fn name(&self) -> String {
        let label = match self.shape {
            CompositeShape::FlatOr => "Awesome MBU Strategy",
            CompositeShape::NestedOr => "Wishful Thinking Strategy",
        };
        format!("{label} ({:.0}, {:.0})", self.rsi.buy_at, self.rsi.sell_at)
    }

    /// Normalized: an action is emitted only when it differs from the last
    /// emitted action.
    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        normalize_stream(self.tree.compute(snapshots))
    }

    fn min_history(&self) -> usize {
        self.leaves()
            .iter()
            .map(|leaf| leaf.min_history())
            .max()
            .unwrap_or(0)
    }

    /// Chart 0: Close with the combined decisions.
    /// Chart 1: MACD and Signal lines with raw MACD outcomes.
    /// Chart 2: RSI with raw RSI outcomes.
    /// Chart 3: AO with raw AO outcomes.
    /// Chart 4: Ulcer Index of the closes.
    fn report(&self, snapshots: Stream<Snapshot>) -> Result<Report, StrategiseError> {
        let [history, combined, macd, rsi, ao] = snapshots.fan_out();
        let history: Vec<Snapshot> = history.collect();

        let (macd_line, signal_line) = macd_columns(&self.macd.series(&history));
        let rsi_values = self.rsi.series(&history).simple_values();
        let ao_values = self.awesome_oscillator.series(&history).simple_values();
        let ulcer_values =
            calculate_ulcer_index(&history, ulcer_index::DEFAULT_PERIOD).simple_values();

        let mut report = Report::new(self.name(), history.iter().map(|s| s.date).collect());

        report.add_column(
            ReportColumn::numeric("Close", history.iter().map(|s| s.close).collect()),
            0,
        )?;
        report.add_column(
            ReportColumn::annotation("Actions", annotations(self.compute(combined))),
            0,
        )?;

        let chart = report.add_chart();
        report.add_column(ReportColumn::numeric("MACD", macd_line), chart)?;
        report.add_column(ReportColumn::numeric("Signal", signal_line), chart)?;
        report.add_column(
            ReportColumn::annotation("MACD Actions", annotations(self.macd.compute(macd))),
            chart,
        )?;

        let chart = report.add_chart();
        report.add_column(ReportColumn::numeric("RSI", rsi_values), chart)?;
        report.add_column(
            ReportColumn::annotation("RSI Actions", annotations(self.rsi.compute(rsi))),
            chart,
        )?;

        let chart = report.add_chart();
        report.add_column(ReportColumn::numeric("AO", ao_values), chart)?;
        report.add_column(
            ReportColumn::annotation(
                "AO Actions",
                annotations(self.awesome_oscillator.compute(ao)),
            ),
            chart,
        )?;

        let chart = report.add_chart();
        report.add_column(ReportColumn::numeric("Ulcer", ulcer_values), chart)?;

        Ok(report)
    }
}
