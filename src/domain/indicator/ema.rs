//! Exponential Moving Average of closing prices.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) snapshots are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::snapshot::Snapshot;

pub fn calculate_ema(snapshots: &[Snapshot], period: usize) -> IndicatorSeries {
    if period == 0 || snapshots.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(snapshots.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, snapshot) in snapshots.iter().enumerate() {
        let valid = if i < period - 1 {
            sum += snapshot.close;
            false
        } else if i == period - 1 {
            sum += snapshot.close;
            ema = sum / period as f64;
            true
        } else {
            ema = snapshot.close * k + ema * (1.0 - k);
            true
        };
        values.push(IndicatorPoint {
            date: snapshot.date,
            valid,
            value: IndicatorValue::Simple(if valid { ema } else { 0.0 }),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}
