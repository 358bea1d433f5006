//! MACD (Moving Average Convergence Divergence) of closing prices.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: slow - 1 + signal - 1 snapshots

use crate::domain::indicator::{
    calculate_ema, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::snapshot::Snapshot;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Index of the first valid MACD point.
pub fn warmup(slow: usize, signal: usize) -> usize {
    slow.saturating_sub(1) + signal.saturating_sub(1)
}

pub fn calculate_macd(
    snapshots: &[Snapshot],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    if snapshots.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return IndicatorSeries {
            indicator_type,
            values: Vec::new(),
        };
    }

    let ema_fast = calculate_ema(snapshots, fast).simple_values();
    let ema_slow = calculate_ema(snapshots, slow).simple_values();
    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();

    let k = 2.0 / (signal_period as f64 + 1.0);
    let mut signal_line: Vec<f64> = vec![0.0; snapshots.len()];
    let macd_warmup = slow - 1;

    if macd_warmup + signal_period <= snapshots.len() {
        let seed: f64 = macd_line[macd_warmup..macd_warmup + signal_period]
            .iter()
            .sum::<f64>()
            / signal_period as f64;
        let mut signal_ema = seed;
        signal_line[macd_warmup + signal_period - 1] = signal_ema;

        for i in (macd_warmup + signal_period)..snapshots.len() {
            signal_ema = macd_line[i] * k + signal_ema * (1.0 - k);
            signal_line[i] = signal_ema;
        }
    }

    let signal_warmup = warmup(slow, signal_period);
    let values = snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| IndicatorPoint {
            date: snapshot.date,
            valid: i >= signal_warmup,
            value: IndicatorValue::Macd {
                line: macd_line[i],
                signal: signal_line[i],
                histogram: macd_line[i] - signal_line[i],
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

/// Split a MACD series into (line, signal) columns, 0.0 during warmup.
pub fn macd_columns(series: &IndicatorSeries) -> (Vec<f64>, Vec<f64>) {
    series
        .values
        .iter()
        .map(|p| match p.value {
            IndicatorValue::Macd { line, signal, .. } if p.valid => (line, signal),
            _ => (0.0, 0.0),
        })
        .unzip()
}
