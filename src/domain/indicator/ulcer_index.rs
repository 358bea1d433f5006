//! Ulcer Index of closing prices.
//!
//! Drawdown = (Close - Highest close over n periods) / Highest × 100
//! UI = sqrt(SMA(n) of Drawdown²)
//!
//! Default parameters: period=14
//! Warmup: first 2×(period-1) snapshots are invalid.

use crate::domain::indicator::{
    sma_values, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::snapshot::Snapshot;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_ulcer_index(snapshots: &[Snapshot], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = snapshots.iter().map(|s| s.close).collect();
    let offset = period.saturating_sub(1);

    // Indexed from the first full highest-close window.
    let squared_drawdowns: Vec<f64> = if period == 0 {
        Vec::new()
    } else {
        (offset..closes.len())
            .map(|i| {
                let highest = closes[i + 1 - period..=i]
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                let drawdown = if highest != 0.0 {
                    (closes[i] - highest) / highest * 100.0
                } else {
                    0.0
                };
                drawdown * drawdown
            })
            .collect()
    };
    let averages = sma_values(&squared_drawdowns, period);

    let values = snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| {
            let average = i
                .checked_sub(offset)
                .and_then(|j| averages.get(j).copied().flatten());
            match average {
                Some(avg) => IndicatorPoint {
                    date: snapshot.date,
                    valid: true,
                    value: IndicatorValue::Simple(avg.max(0.0).sqrt()),
                },
                None => IndicatorPoint {
                    date: snapshot.date,
                    valid: false,
                    value: IndicatorValue::Simple(0.0),
                },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::UlcerIndex(period),
        values,
    }
}
