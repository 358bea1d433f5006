//! RSI (Relative Strength Index) of closing prices.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n snapshots are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::snapshot::Snapshot;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(snapshots: &[Snapshot], period: usize) -> IndicatorSeries {
    let invalid = |s: &Snapshot| IndicatorPoint {
        date: s.date,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    };

    if period == 0 || snapshots.len() < 2 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values: snapshots.iter().map(invalid).collect(),
        };
    }

    let mut values = Vec::with_capacity(snapshots.len());
    values.push(invalid(&snapshots[0]));

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, pair) in snapshots.windows(2).enumerate() {
        let change = pair[1].close - pair[0].close;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i < period {
            avg_gain += gain / period as f64;
            avg_loss += loss / period as f64;
        } else {
            avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
        }

        if i + 1 < period {
            values.push(invalid(&pair[1]));
            continue;
        }

        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        };
        values.push(IndicatorPoint {
            date: pair[1].date,
            valid: true,
            value: IndicatorValue::Simple(rsi),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}
