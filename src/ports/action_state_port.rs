//! Persistence of the latest decision per (asset, strategy) pair.

use crate::domain::action::Action;
use crate::domain::error::StrategiseError;

pub trait ActionStatePort {
    /// Record `action` as the current decision, replacing any earlier one.
    fn set_action(&self, action: Action, asset: &str, strategy: &str) -> Result<(), StrategiseError>;

    /// The recorded decision, if any.
    fn action(&self, asset: &str, strategy: &str) -> Result<Option<Action>, StrategiseError>;
}
