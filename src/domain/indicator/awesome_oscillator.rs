//! Awesome Oscillator.
//!
//! Median Price = (High + Low) / 2
//! AO = SMA(short) of median price - SMA(long) of median price
//!
//! Default parameters: short=5, long=34
//! Warmup: first (long-1) snapshots are invalid.

use crate::domain::indicator::{
    sma_values, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::snapshot::Snapshot;

pub const DEFAULT_SHORT: usize = 5;
pub const DEFAULT_LONG: usize = 34;

pub fn calculate_awesome_oscillator(
    snapshots: &[Snapshot],
    short: usize,
    long: usize,
) -> IndicatorSeries {
    let medians: Vec<f64> = snapshots.iter().map(Snapshot::median_price).collect();
    let short_sma = sma_values(&medians, short);
    let long_sma = sma_values(&medians, long);

    let values = snapshots
        .iter()
        .zip(short_sma.iter().zip(&long_sma))
        .map(|(snapshot, pair)| match pair {
            (Some(s), Some(l)) => IndicatorPoint {
                date: snapshot.date,
                valid: true,
                value: IndicatorValue::Simple(s - l),
            },
            _ => IndicatorPoint {
                date: snapshot.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::AwesomeOscillator { short, long },
        values,
    }
}
