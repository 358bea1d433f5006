//! Awesome Oscillator zero-line signal.

use crate::domain::action::Action;
use crate::domain::indicator::awesome_oscillator::{DEFAULT_LONG, DEFAULT_SHORT};
use crate::domain::indicator::{calculate_awesome_oscillator, IndicatorSeries, IndicatorValue};
use crate::domain::report::ReportColumn;
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

use super::{compute_over, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwesomeOscillatorStrategy {
    pub short: usize,
    pub long: usize,
}

impl AwesomeOscillatorStrategy {
    pub fn new() -> Self {
        Self {
            short: DEFAULT_SHORT,
            long: DEFAULT_LONG,
        }
    }

    pub fn series(&self, history: &[Snapshot]) -> IndicatorSeries {
        calculate_awesome_oscillator(history, self.short, self.long)
    }

    fn actions(&self, history: &[Snapshot]) -> Vec<Action> {
        self.series(history)
            .values
            .iter()
            .map(|point| match point.value {
                IndicatorValue::Simple(ao) if point.valid && ao > 0.0 => Action::Buy,
                IndicatorValue::Simple(ao) if point.valid && ao < 0.0 => Action::Sell,
                _ => Action::Hold,
            })
            .collect()
    }
}

impl Default for AwesomeOscillatorStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AwesomeOscillatorStrategy {
    fn name(&self) -> String {
        "Awesome Oscillator Strategy".to_string()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let strategy = *self;
        compute_over(snapshots, move |history| strategy.actions(history))
    }

    fn min_history(&self) -> usize {
        self.long
    }

    fn indicator_columns(&self, history: &[Snapshot]) -> Vec<ReportColumn> {
        vec![ReportColumn::numeric("AO", self.series(history).simple_values())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_snapshots(medians: &[f64]) -> Vec<Snapshot> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        medians
            .iter()
            .enumerate()
            .map(|(i, &m)| Snapshot {
                date: start + chrono::Duration::days(i as i64),
                open: m,
                high: m,
                low: m,
                close: m,
                volume: 0,
            })
            .collect()
    }

    #[test]
    fn rising_median_buys_after_warmup() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let actions: Vec<Action> = AwesomeOscillatorStrategy::new()
            .compute(make_snapshots(&prices).into())
            .collect();
        assert!(actions[..33].iter().all(|a| *a == Action::Hold));
        assert!(actions[33..].iter().all(|a| *a == Action::Buy));
    }

    #[test]
    fn falling_median_sells() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
        let actions: Vec<Action> = AwesomeOscillatorStrategy::new()
            .compute(make_snapshots(&prices).into())
            .collect();
        assert_eq!(actions[39], Action::Sell);
    }

    #[test]
    fn flat_median_holds() {
        let actions: Vec<Action> = AwesomeOscillatorStrategy::new()
            .compute(make_snapshots(&[50.0; 40]).into())
            .collect();
        assert!(actions.iter().all(|a| *a == Action::Hold));
    }

    #[test]
    fn min_history_is_long_period() {
        assert_eq!(AwesomeOscillatorStrategy::new().min_history(), 34);
    }
}
