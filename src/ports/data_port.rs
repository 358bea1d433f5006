//! Asset price history access port.

use chrono::NaiveDate;

use crate::domain::error::StrategiseError;
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

pub trait DataPort {
    /// Names of all non-retired assets, ascending.
    fn assets(&self) -> Vec<String>;

    fn get(&self, name: &str) -> Result<Stream<Snapshot>, StrategiseError>;

    /// Snapshots dated on or after `since`.
    fn get_since(&self, name: &str, since: NaiveDate) -> Result<Stream<Snapshot>, StrategiseError> {
        Ok(self.get(name)?.filtered(move |s| s.date >= since))
    }

    fn last_date(&self, name: &str) -> Result<NaiveDate, StrategiseError>;

    /// Append one close price per snapshot to the end of `name`'s history.
    ///
    /// Best effort: items appended before a failure are kept.
    fn append(&mut self, name: &str, snapshots: Stream<Snapshot>) -> Result<(), StrategiseError>;
}
