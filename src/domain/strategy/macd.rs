//! MACD crossover signal: Buy while the MACD line sits above its signal
//! line, Sell while it sits below.

use crate::domain::action::Action;
use crate::domain::indicator::macd::{self, DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{calculate_macd, IndicatorSeries, IndicatorValue};
use crate::domain::report::ReportColumn;
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

use super::{compute_over, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdStrategy {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdStrategy {
    pub fn new() -> Self {
        Self::with(DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
    }

    /// Quicker to react than the default, at the cost of more whipsaws.
    pub fn fast() -> Self {
        Self::with(5, 35, 5)
    }

    pub fn with(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    pub fn series(&self, history: &[Snapshot]) -> IndicatorSeries {
        calculate_macd(history, self.fast, self.slow, self.signal)
    }

    fn actions(&self, history: &[Snapshot]) -> Vec<Action> {
        let series = self.series(history);
        if series.values.is_empty() {
            return vec![Action::Hold; history.len()];
        }
        series
            .values
            .iter()
            .map(|point| match point.value {
                IndicatorValue::Macd { line, signal, .. } if point.valid => {
                    if line > signal {
                        Action::Buy
                    } else if line < signal {
                        Action::Sell
                    } else {
                        Action::Hold
                    }
                }
                _ => Action::Hold,
            })
            .collect()
    }
}

impl Default for MacdStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MacdStrategy {
    fn name(&self) -> String {
        format!("MACD Strategy ({}, {}, {})", self.fast, self.slow, self.signal)
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let strategy = *self;
        compute_over(snapshots, move |history| strategy.actions(history))
    }

    fn min_history(&self) -> usize {
        macd::warmup(self.slow, self.signal) + 1
    }

    fn indicator_columns(&self, history: &[Snapshot]) -> Vec<ReportColumn> {
        let (line, signal) = macd::macd_columns(&self.series(history));
        vec![
            ReportColumn::numeric("MACD", line),
            ReportColumn::numeric("Signal", signal),
        ]
    }
}
