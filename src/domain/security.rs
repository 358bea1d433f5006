//! Securities and their close-price history.

use chrono::{DateTime, NaiveDate, Utc};

/// Import files store prices multiplied by this factor.
pub const PRICE_SCALE: f64 = 1e8;

/// A single close price, already descaled to true units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct Security {
    /// Cleaned name, unique across the record store.
    pub name: String,
    pub currency_code: String,
    pub isin: String,
    pub ticker_symbol: String,
    /// Ascending by date.
    pub prices: Vec<Price>,
    pub is_retired: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Security {
    pub fn last_price(&self) -> Option<&Price> {
        self.prices.last()
    }
}

/// Descale a raw import value.
pub fn descale(raw: f64) -> f64 {
    raw / PRICE_SCALE
}
