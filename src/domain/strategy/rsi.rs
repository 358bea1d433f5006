//! RSI threshold signal: Buy at or below the oversold level, Sell at or above
//! the overbought level.

use crate::domain::action::Action;
use crate::domain::indicator::rsi::DEFAULT_PERIOD;
use crate::domain::indicator::{calculate_rsi, IndicatorSeries, IndicatorValue};
use crate::domain::report::ReportColumn;
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

use super::composite::{DEFAULT_BUY_AT, DEFAULT_SELL_AT};
use super::{compute_over, Strategy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiStrategy {
    pub period: usize,
    pub buy_at: f64,
    pub sell_at: f64,
}

impl RsiStrategy {
    pub fn new() -> Self {
        Self::with(DEFAULT_BUY_AT, DEFAULT_SELL_AT)
    }

    pub fn with(buy_at: f64, sell_at: f64) -> Self {
        Self {
            period: DEFAULT_PERIOD,
            buy_at,
            sell_at,
        }
    }

    pub fn series(&self, history: &[Snapshot]) -> IndicatorSeries {
        calculate_rsi(history, self.period)
    }

    fn actions(&self, history: &[Snapshot]) -> Vec<Action> {
        self.series(history)
            .values
            .iter()
            .map(|point| match point.value {
                IndicatorValue::Simple(rsi) if point.valid => {
                    if rsi <= self.buy_at {
                        Action::Buy
                    } else if rsi >= self.sell_at {
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

impl Default for RsiStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> String {
        format!("RSI Strategy ({:.0}, {:.0})", self.buy_at, self.sell_at)
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let strategy = *self;
        compute_over(snapshots, move |history| strategy.actions(history))
    }

    fn min_history(&self) -> usize {
        self.period + 1
    }

    fn indicator_columns(&self, history: &[Snapshot]) -> Vec<ReportColumn> {
        vec![ReportColumn::numeric("RSI", self.series(history).simple_values())]
    }
}
