//! Signal sources and their composition.
//!
//! A [`Strategy`] turns a snapshot stream into an action stream aligned 1:1
//! with it. Leaves wrap a single indicator; [`OrStrategy`] combines two or
//! more children; [`CompositeStrategy`] wraps a fixed OR tree and normalizes
//! its outcome into edge-triggered decisions.
//!
//! Leaves need a minimum amount of history before their indicator produces
//! anything. Callers check [`Strategy::min_history`] before computing; below
//! it the outcomes are unspecified.

pub mod awesome_oscillator;
pub mod bollinger;
pub mod composite;
pub mod macd;
pub mod or_strategy;
pub mod rsi;

pub use awesome_oscillator::AwesomeOscillatorStrategy;
pub use bollinger::BollingerBandsStrategy;
pub use composite::{CompositeShape, CompositeStrategy, DEFAULT_BUY_AT, DEFAULT_SELL_AT};
pub use macd::MacdStrategy;
pub use or_strategy::OrStrategy;
pub use rsi::RsiStrategy;

use std::sync::Arc;

use crate::domain::action::{annotations, normalize, Action};
use crate::domain::error::StrategiseError;
use crate::domain::report::{Report, ReportColumn};
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

pub trait Strategy: Send + Sync {
    fn name(&self) -> String;

    /// Raw per-snapshot outcomes. Pure in `snapshots`.
    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action>;

    /// Snapshots needed before the outcomes mean anything.
    fn min_history(&self) -> usize {
        0
    }

    /// Indicator columns charted beneath the price chart.
    fn indicator_columns(&self, _history: &[Snapshot]) -> Vec<ReportColumn> {
        Vec::new()
    }

    fn report(&self, snapshots: Stream<Snapshot>) -> Result<Report, StrategiseError> {
        let [history, actions] = snapshots.fan_out();
        let history: Vec<Snapshot> = history.collect();

        let mut report = Report::new(self.name(), history.iter().map(|s| s.date).collect());
        report.add_column(
            ReportColumn::numeric("Close", history.iter().map(|s| s.close).collect()),
            0,
        )?;
        report.add_column(
            ReportColumn::annotation("Actions", annotations(normalize(self.compute(actions)))),
            0,
        )?;

        let columns = self.indicator_columns(&history);
        if !columns.is_empty() {
            let chart = report.add_chart();
            for column in columns {
                report.add_column(column, chart)?;
            }
        }

        Ok(report)
    }
}

/// Run a slice-based signal over a whole stream.
pub(crate) fn compute_over<F>(snapshots: Stream<Snapshot>, signal: F) -> Stream<Action>
where
    F: FnOnce(&[Snapshot]) -> Vec<Action>,
{
    let history: Vec<Snapshot> = snapshots.collect();
    Stream::from(signal(&history))
}

/// Strategy keys accepted by [`build`].
pub const STRATEGY_KEYS: [&str; 7] = [
    "wishful_thinking",
    "awesome_mbu",
    "macd",
    "fast_macd",
    "rsi",
    "awesome_oscillator",
    "bollinger_bands",
];

pub const DEFAULT_STRATEGY_KEYS: [&str; 6] = [
    "wishful_thinking",
    "awesome_mbu",
    "macd",
    "rsi",
    "awesome_oscillator",
    "bollinger_bands",
];

/// Build a strategy from its configuration key.
pub fn build(key: &str, buy_at: f64, sell_at: f64) -> Result<Arc<dyn Strategy>, StrategiseError> {
    let strategy: Arc<dyn Strategy> = match key {
        "wishful_thinking" => Arc::new(CompositeStrategy::nested_or_with(buy_at, sell_at)),
        "awesome_mbu" => Arc::new(CompositeStrategy::flat_or_with(buy_at, sell_at)),
        "macd" => Arc::new(MacdStrategy::new()),
        "fast_macd" => Arc::new(MacdStrategy::fast()),
        "rsi" => Arc::new(RsiStrategy::with(buy_at, sell_at)),
        "awesome_oscillator" => Arc::new(AwesomeOscillatorStrategy::new()),
        "bollinger_bands" => Arc::new(BollingerBandsStrategy::new()),
        unknown => {
            return Err(StrategiseError::UnknownStrategy {
                name: unknown.to_string(),
            })
        }
    };
    Ok(strategy)
}
