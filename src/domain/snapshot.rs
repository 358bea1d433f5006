//! Daily OHLCV snapshots and their synthesis from close-only prices.

use chrono::NaiveDate;

use crate::domain::security::Price;

/// Calendar date format shared by import price dates and snapshot dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Snapshot {
    /// (high + low) / 2
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

/// Parses `value` only if it is exactly in [`DATE_FORMAT`]: zero-padded
/// month and day, four-digit year, no sign.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Turns an ascending close-price sequence into snapshots.
///
/// The source has no intraday range, so each snapshot opens at the previous
/// close (the first opens at its own close) and high/low are the larger and
/// smaller of open and close. Volume is always zero.
pub struct Synthesizer<I> {
    prices: I,
    last_close: Option<f64>,
}

impl<I> Synthesizer<I>
where
    I: Iterator<Item = Price>,
{
    pub fn new(prices: I) -> Self {
        Self {
            prices,
            last_close: None,
        }
    }
}

impl<I> Iterator for Synthesizer<I>
where
    I: Iterator<Item = Price>,
{
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let price = self.prices.next()?;
        let close = price.value;
        let open = self.last_close.unwrap_or(close);
        self.last_close = Some(close);

        Some(Snapshot {
            date: price.date,
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 0,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.prices.size_hint()
    }
}

pub fn synthesize<I>(prices: I) -> Synthesizer<I::IntoIter>
where
    I: IntoIterator<Item = Price>,
{
    Synthesizer::new(prices.into_iter())
}
