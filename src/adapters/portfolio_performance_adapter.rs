//! Portfolio Performance XML import adapter.
//!
//! The whole file is parsed up front into an in-memory record store keyed by
//! cleaned security name. Construction either succeeds completely or fails
//! with nothing built.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::error::StrategiseError;
use crate::domain::filename::clean_filename;
use crate::domain::security::{descale, Price, Security};
use crate::domain::snapshot::{parse_date, synthesize, Snapshot};
use crate::domain::stream::Stream;
use crate::ports::data_port::DataPort;

#[derive(Debug, Deserialize)]
struct ClientXml {
    #[serde(default)]
    securities: SecuritiesXml,
}

#[derive(Debug, Default, Deserialize)]
struct SecuritiesXml {
    #[serde(rename = "security", default)]
    items: Vec<SecurityXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecurityXml {
    #[serde(default)]
    name: String,
    #[serde(default)]
    currency_code: String,
    #[serde(default)]
    isin: String,
    #[serde(default)]
    ticker_symbol: String,
    #[serde(default)]
    prices: PricesXml,
    #[serde(default)]
    is_retired: String,
    #[serde(default)]
    updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
struct PricesXml {
    #[serde(rename = "price", default)]
    items: Vec<PriceXml>,
}

#[derive(Debug, Deserialize)]
struct PriceXml {
    #[serde(rename = "@t")]
    date: String,
    #[serde(rename = "@v")]
    value: f64,
}

pub struct PortfolioPerformanceAdapter {
    securities: BTreeMap<String, Security>,
}

impl PortfolioPerformanceAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StrategiseError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StrategiseError::ImportRead {
            path: path.to_path_buf(),
            source,
        })?;
        let adapter = Self::from_xml(&content)?;
        tracing::info!(
            path = %path.display(),
            securities = adapter.securities.len(),
            prices = adapter.securities.values().map(|s| s.prices.len()).sum::<usize>(),
            "imported portfolio"
        );
        Ok(adapter)
    }

    pub fn from_xml(content: &str) -> Result<Self, StrategiseError> {
        let client: ClientXml =
            quick_xml::de::from_str(content).map_err(|e| StrategiseError::ImportParse {
                reason: e.to_string(),
            })?;

        let mut securities: BTreeMap<String, Security> = BTreeMap::new();
        let mut original_names: BTreeMap<String, String> = BTreeMap::new();
        for raw in client.securities.items {
            let original = raw.name.clone();
            let security = convert_security(raw)?;
            if let Some(first) = original_names.get(&security.name) {
                tracing::warn!(
                    name = %security.name,
                    first = %first,
                    second = %original,
                    "two securities share a cleaned name"
                );
                return Err(StrategiseError::DuplicateAsset {
                    name: security.name,
                    first: first.clone(),
                    second: original,
                });
            }
            original_names.insert(security.name.clone(), original);
            tracing::debug!(
                name = %security.name,
                prices = security.prices.len(),
                retired = security.is_retired,
                "loaded security"
            );
            securities.insert(security.name.clone(), security);
        }

        Ok(Self { securities })
    }

    pub fn security(&self, name: &str) -> Result<&Security, StrategiseError> {
        self.securities
            .get(name)
            .ok_or_else(|| StrategiseError::asset_not_found(name))
    }

    pub fn securities(&self) -> impl Iterator<Item = &Security> {
        self.securities.values()
    }
}

fn convert_security(raw: SecurityXml) -> Result<Security, StrategiseError> {
    let name = clean_filename(&raw.name);

    let mut prices = raw
        .prices
        .items
        .into_iter()
        .map(|p| {
            let date = parse_date(&p.date).ok_or_else(|| StrategiseError::InvalidPriceDate {
                security: name.clone(),
                date: p.date.clone(),
            })?;
            Ok(Price {
                date,
                value: descale(p.value),
            })
        })
        .collect::<Result<Vec<Price>, StrategiseError>>()?;
    // Stable: prices sharing a date keep their file order.
    prices.sort_by_key(|p| p.date);

    let updated_at = match raw.updated_at.trim() {
        "" => None,
        value => Some(
            DateTime::parse_from_rfc3339(value)
                .map_err(|e| StrategiseError::ImportParse {
                    reason: format!("invalid updatedAt {value:?} for security {name}: {e}"),
                })?
                .with_timezone(&Utc),
        ),
    };

    Ok(Security {
        name,
        currency_code: raw.currency_code,
        isin: raw.isin,
        ticker_symbol: raw.ticker_symbol,
        prices,
        is_retired: raw.is_retired.trim() == "true",
        updated_at,
    })
}

impl DataPort for PortfolioPerformanceAdapter {
    fn assets(&self) -> Vec<String> {
        // BTreeMap keys are already ascending.
        self.securities
            .values()
            .filter(|s| !s.is_retired)
            .map(|s| s.name.clone())
            .collect()
    }

    fn get(&self, name: &str) -> Result<Stream<Snapshot>, StrategiseError> {
        let prices = self.security(name)?.prices.clone();
        Ok(Stream::spawn(synthesize(prices)))
    }

    fn last_date(&self, name: &str) -> Result<NaiveDate, StrategiseError> {
        self.security(name)?
            .last_price()
            .map(|p| p.date)
            .ok_or_else(|| StrategiseError::EmptyAsset {
                name: name.to_string(),
            })
    }

    fn append(&mut self, name: &str, snapshots: Stream<Snapshot>) -> Result<(), StrategiseError> {
        let mut appended = 0usize;
        for snapshot in snapshots {
            let security = self
                .securities
                .get_mut(name)
                .ok_or_else(|| StrategiseError::asset_not_found(name))?;
            security.prices.push(Price {
                date: snapshot.date,
                value: snapshot.close,
            });
            appended += 1;
        }
        tracing::debug!(name, appended, "appended prices");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund(name: &str, retired: bool, prices: &[(&str, u64)]) -> String {
        let prices: String = prices
            .iter()
            .map(|(t, v)| format!(r#"<price t="{t}" v="{v}"/>"#))
            .collect();
        format!(
            "<security><name>{name}</name><currencyCode>GBP</currencyCode>\
             <isin>GB0000000001</isin><tickerSymbol>FND</tickerSymbol>\
             <prices>{prices}</prices><isRetired>{retired}</isRetired>\
             <updatedAt>2024-03-01T10:15:00Z</updatedAt></security>"
        )
    }

    fn client(securities: &[String]) -> String {
        format!(
            r#"<client><version>66</version><baseCurrency>GBP</baseCurrency><securities>{}</securities></client>"#,
            securities.concat()
        )
    }

    #[test]
    fn parses_and_cleans_securities() {
        let xml = client(&[fund("Bonds & Gilts/UK", false, &[("2024-01-02", 10_000_000_000)])]);
        let adapter = PortfolioPerformanceAdapter::from_xml(&xml).unwrap();

        let security = adapter.security("Bonds_And_Gilts-UK").unwrap();
        assert_eq!(security.currency_code, "GBP");
        assert_eq!(security.isin, "GB0000000001");
        assert_eq!(security.ticker_symbol, "FND");
        assert!(!security.is_retired);
        assert_eq!(
            security.updated_at.map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:15:00+00:00".to_string())
        );
        assert_eq!(security.prices.len(), 1);
        assert!((security.prices[0].value - 100.0).abs() < 1e-12);
    }

    #[test]
    fn sorts_prices_ascending() {
        let xml = client(&[fund(
            "Fund",
            false,
            &[
                ("2024-01-03", 300),
                ("2024-01-01", 100),
                ("2024-01-02", 200),
            ],
        )]);
        let adapter = PortfolioPerformanceAdapter::from_xml(&xml).unwrap();
        let dates: Vec<String> = adapter
            .security("Fund")
            .unwrap()
            .prices
            .iter()
            .map(|p| p.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn equal_dates_keep_file_order() {
        let xml = client(&[fund(
            "Fund",
            false,
            &[("2024-01-02", 200), ("2024-01-01", 100), ("2024-01-02", 300)],
        )]);
        let adapter = PortfolioPerformanceAdapter::from_xml(&xml).unwrap();
        let values: Vec<f64> = adapter
            .security("Fund")
            .unwrap()
            .prices
            .iter()
            .map(|p| p.value * 1e8)
            .collect();
        assert_eq!(values.len(), 3);
        assert!((values[1] - 200.0).abs() < 1e-6);
        assert!((values[2] - 300.0).abs() < 1e-6);
    }

    #[test]
    fn bad_date_rejects_import() {
        let xml = client(&[fund("Fund", false, &[("02/01/2024", 100)])]);
        let err = PortfolioPerformanceAdapter::from_xml(&xml).err().unwrap();
        assert!(matches!(
            err,
            StrategiseError::InvalidPriceDate { ref security, ref date }
                if security == "Fund" && date == "02/01/2024"
        ));
    }

    #[test]
    fn non_canonical_dates_reject_import() {
        for bad in ["2024-1-5", "+2024-01-06"] {
            let xml = client(&[fund("Fund", false, &[("2024-01-04", 100), (bad, 200)])]);
            let err = PortfolioPerformanceAdapter::from_xml(&xml).err().unwrap();
            assert!(
                matches!(err, StrategiseError::InvalidPriceDate { ref date, .. } if date == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_xml_rejects_import() {
        let err = PortfolioPerformanceAdapter::from_xml("<client><securities>")
            .err()
            .unwrap();
        assert!(matches!(err, StrategiseError::ImportParse { .. }));
    }

    #[test]
    fn names_colliding_after_cleaning_are_rejected() {
        let xml = client(&[fund("A B", false, &[]), fund("A_B", false, &[])]);
        let err = PortfolioPerformanceAdapter::from_xml(&xml).err().unwrap();
        assert!(matches!(
            err,
            StrategiseError::DuplicateAsset { ref name, ref first, ref second }
                if name == "A_B" && first == "A B" && second == "A_B"
        ));
        assert_eq!(
            err.to_string(),
            "securities \"A B\" and \"A_B\" share the cleaned name A_B"
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = PortfolioPerformanceAdapter::from_file("/nonexistent/portfolio.xml")
            .err()
            .unwrap();
        assert!(matches!(err, StrategiseError::ImportRead { .. }));
    }

    #[test]
    fn empty_client() {
        let adapter = PortfolioPerformanceAdapter::from_xml("<client></client>").unwrap();
        assert!(adapter.assets().is_empty());
    }

    #[test]
    fn append_to_unknown_asset_fails() {
        let mut adapter = PortfolioPerformanceAdapter::from_xml(&client(&[])).unwrap();
        let snapshot = Snapshot {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 0,
        };
        let err = adapter.append("Missing", vec![snapshot].into()).err().unwrap();
        assert!(matches!(err, StrategiseError::AssetNotFound { name } if name == "Missing"));
        assert!(adapter.append("Missing", Stream::empty()).is_ok());
    }
}
