//! Bollinger Bands breakout signal: Buy on a close below the lower band,
//! Sell on a close above the upper band.

use crate::domain::action::Action;
use crate::domain::indicator::bollinger::{DEFAULT_PERIOD, DEFAULT_STDDEV_MULT_X100};
use crate::domain::indicator::{calculate_bollinger, IndicatorSeries, IndicatorValue};
use crate::domain::report::ReportColumn;
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

use super::{compute_over, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BollingerBandsStrategy {
    pub period: usize,
    pub stddev_mult_x100: u32,
}

impl BollingerBandsStrategy {
    pub fn new() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            stddev_mult_x100: DEFAULT_STDDEV_MULT_X100,
        }
    }

    pub fn series(&self, history: &[Snapshot]) -> IndicatorSeries {
        calculate_bollinger(history, self.period, self.stddev_mult_x100)
    }

    fn actions(&self, history: &[Snapshot]) -> Vec<Action> {
        self.series(history)
            .values
            .iter()
            .zip(history)
            .map(|(point, snapshot)| match point.value {
                IndicatorValue::Bollinger { upper, lower, .. } if point.valid => {
                    if snapshot.close < lower {
                        Action::Buy
                    } else if snapshot.close > upper {
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

impl Default for BollingerBandsStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BollingerBandsStrategy {
    fn name(&self) -> String {
        "Bollinger Bands Strategy".to_string()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let strategy = *self;
        compute_over(snapshots, move |history| strategy.actions(history))
    }

    fn min_history(&self) -> usize {
        self.period
    }

    fn indicator_columns(&self, history: &[Snapshot]) -> Vec<ReportColumn> {
        let (upper, middle, lower) = self
            .series(history)
            .values
            .iter()
            .map(|p| match p.value {
                IndicatorValue::Bollinger {
                    upper,
                    middle,
                    lower,
                } if p.valid => (upper, middle, lower),
                _ => (0.0, 0.0, 0.0),
            })
            .fold(
                (Vec::new(), Vec::new(), Vec::new()),
                |(mut u, mut m, mut l), (upper, middle, lower)| {
                    u.push(upper);
                    m.push(middle);
                    l.push(lower);
                    (u, m, l)
                },
            );
        vec![
            ReportColumn::numeric("Upper", upper),
            ReportColumn::numeric("Middle", middle),
            ReportColumn::numeric("Lower", lower),
        ]
    }
}
