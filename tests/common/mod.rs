#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::sync::Mutex;
use strategise::domain::action::Action;
use strategise::domain::error::StrategiseError;
use strategise::domain::security::PRICE_SCALE;
pub use strategise::domain::snapshot::Snapshot;
use strategise::domain::stream::Stream;
use strategise::ports::action_state_port::ActionStatePort;
use strategise::ports::data_port::DataPort;

/// One `<security>` element with prices given in true units; they are
/// scaled the way the export stores them.
pub fn security_xml(name: &str, retired: bool, prices: &[(&str, f64)]) -> String {
    let prices: String = prices
        .iter()
        .map(|(date, value)| format!(r#"<price t="{date}" v="{}"/>"#, (value * PRICE_SCALE).round() as i64))
        .collect();
    format!(
        "<security>\
           <uuid>00000000-0000-0000-0000-000000000000</uuid>\
           <name>{name}</name>\
           <currencyCode>EUR</currencyCode>\
           <isin></isin>\
           <tickerSymbol></tickerSymbol>\
           <prices>{prices}</prices>\
           <isRetired>{retired}</isRetired>\
           <updatedAt>2024-05-01T08:00:00.000Z</updatedAt>\
         </security>"
    )
}

pub fn client_xml(securities: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<client>
  <version>66</version>
  <baseCurrency>EUR</baseCurrency>
  <securities>{}</securities>
  <accounts/>
</client>"#,
        securities.concat()
    )
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// `n` consecutive daily dates starting 2023-01-02, formatted for the export.
pub fn daily_dates(n: usize) -> Vec<String> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    (0..n)
        .map(|i| (start + chrono::Duration::days(i as i64)).format("%Y-%m-%d").to_string())
        .collect()
}

/// A rally followed by a steeper slide.
pub fn rally_then_slide(n: usize) -> Vec<f64> {
    let half = n / 2;
    (0..n)
        .map(|i| {
            if i < half {
                100.0 + i as f64
            } else {
                100.0 + half as f64 - 2.0 * (i - half) as f64
            }
        })
        .collect()
}

pub fn security_with_series(name: &str, closes: &[f64]) -> String {
    let dates = daily_dates(closes.len());
    let prices: Vec<(&str, f64)> = dates
        .iter()
        .zip(closes)
        .map(|(d, c)| (d.as_str(), *c))
        .collect();
    security_xml(name, false, &prices)
}

pub fn make_snapshots(closes: &[f64]) -> Vec<Snapshot> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Snapshot {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        })
        .collect()
}

pub struct MockDataPort {
    pub data: BTreeMap<String, Vec<Snapshot>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, name: &str, closes: &[f64]) -> Self {
        self.data.insert(name.to_string(), make_snapshots(closes));
        self
    }

    pub fn with_error(mut self, name: &str, reason: &str) -> Self {
        self.errors.insert(name.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn assets(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Result<Stream<Snapshot>, StrategiseError> {
        if let Some(reason) = self.errors.get(name) {
            return Err(StrategiseError::ImportParse {
                reason: reason.clone(),
            });
        }
        self.data
            .get(name)
            .cloned()
            .map(Stream::from)
            .ok_or_else(|| StrategiseError::asset_not_found(name))
    }

    fn last_date(&self, name: &str) -> Result<NaiveDate, StrategiseError> {
        self.data
            .get(name)
            .ok_or_else(|| StrategiseError::asset_not_found(name))?
            .last()
            .map(|s| s.date)
            .ok_or_else(|| StrategiseError::EmptyAsset {
                name: name.to_string(),
            })
    }

    fn append(&mut self, name: &str, snapshots: Stream<Snapshot>) -> Result<(), StrategiseError> {
        let history = self
            .data
            .get_mut(name)
            .ok_or_else(|| StrategiseError::asset_not_found(name))?;
        history.extend(snapshots);
        Ok(())
    }
}

/// Records decisions in memory.
#[derive(Default)]
pub struct MockActionState {
    pub actions: Mutex<BTreeMap<(String, String), Action>>,
}

impl ActionStatePort for MockActionState {
    fn set_action(&self, action: Action, asset: &str, strategy: &str) -> Result<(), StrategiseError> {
        self.actions
            .lock()
            .unwrap()
            .insert((asset.to_string(), strategy.to_string()), action);
        Ok(())
    }

    fn action(&self, asset: &str, strategy: &str) -> Result<Option<Action>, StrategiseError> {
        Ok(self
            .actions
            .lock()
            .unwrap()
            .get(&(asset.to_string(), strategy.to_string()))
            .copied())
    }
}
