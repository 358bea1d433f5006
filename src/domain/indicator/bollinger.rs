//! Bollinger Bands of closing prices.
//!
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) snapshots are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::snapshot::Snapshot;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STDDEV_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    snapshots: &[Snapshot],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let mult = stddev_mult_x100 as f64 / 100.0;

    let values = snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| {
            let valid = period > 0 && i + 1 >= period;

            let (upper, middle, lower) = if valid {
                let window = &snapshots[i + 1 - period..=i];
                let middle: f64 = window.iter().map(|s| s.close).sum::<f64>() / period as f64;
                let variance: f64 = window
                    .iter()
                    .map(|s| (s.close - middle).powi(2))
                    .sum::<f64>()
                    / period as f64;
                let stddev = variance.sqrt();
                (middle + mult * stddev, middle, middle - mult * stddev)
            } else {
                (0.0, 0.0, 0.0)
            };

            IndicatorPoint {
                date: snapshot.date,
                valid,
                value: IndicatorValue::Bollinger {
                    upper,
                    middle,
                    lower,
                },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_snapshots(prices: &[f64]) -> Vec<Snapshot> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Snapshot {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 0,
            })
            .collect()
    }

    fn bands(series: &IndicatorSeries, i: usize) -> (f64, f64, f64) {
        match series.values[i].value {
            IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            } => (upper, middle, lower),
            _ => panic!("Expected Bollinger value"),
        }
    }

    #[test]
    fn bollinger_warmup() {
        let series = calculate_bollinger(&make_snapshots(&[10.0, 20.0, 30.0, 40.0, 50.0]), 3, 200);
        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2..].iter().all(|p| p.valid));
    }

    #[test]
    fn bollinger_constant_values() {
        let series = calculate_bollinger(&make_snapshots(&[100.0; 5]), 3, 200);
        let (upper, middle, lower) = bands(&series, 2);
        assert!((middle - 100.0).abs() < f64::EPSILON);
        assert!((upper - 100.0).abs() < f64::EPSILON);
        assert!((lower - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let series = calculate_bollinger(&make_snapshots(&[10.0, 20.0, 30.0]), 3, 200);
        let (upper, middle, lower) = bands(&series, 2);

        let expected_middle: f64 = 20.0;
        let variance: f64 = (100.0 + 0.0 + 100.0) / 3.0;
        let stddev = variance.sqrt();

        assert!((middle - expected_middle).abs() < 1e-10);
        assert!((upper - (expected_middle + 2.0 * stddev)).abs() < 1e-10);
        assert!((lower - (expected_middle - 2.0 * stddev)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_zero_period_is_invalid() {
        let series = calculate_bollinger(&make_snapshots(&[10.0, 20.0]), 0, 200);
        assert_eq!(series.values.len(), 2);
        assert!(series.values.iter().all(|p| !p.valid));
    }
}
