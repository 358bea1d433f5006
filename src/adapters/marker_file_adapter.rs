//! Decision markers on disk.
//!
//! The current decision for an (asset, strategy) pair is the name of an empty
//! file `{asset}--{strategy}--{BUY|SELL|HOLD}` in the report directory.
//! Updates remove all three candidates and then create one, so an
//! interruption in between can leave no marker until the next run.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use crate::domain::action::Action;
use crate::domain::error::StrategiseError;
use crate::domain::filename::clean_filename;
use crate::ports::action_state_port::ActionStatePort;

pub struct MarkerFileAdapter {
    report_dir: PathBuf,
}

impl MarkerFileAdapter {
    pub fn new(report_dir: PathBuf) -> Self {
        Self { report_dir }
    }

    pub fn marker_path(&self, action: Action, asset: &str, strategy: &str) -> PathBuf {
        self.report_dir.join(format!(
            "{}--{}--{}",
            clean_filename(asset),
            clean_filename(strategy),
            action.marker_label()
        ))
    }
}

impl ActionStatePort for MarkerFileAdapter {
    fn set_action(&self, action: Action, asset: &str, strategy: &str) -> Result<(), StrategiseError> {
        for candidate in Action::ALL {
            match fs::remove_file(self.marker_path(candidate, asset, strategy)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let path = self.marker_path(action, asset, strategy);
        File::create(&path)?;
        tracing::debug!(path = %path.display(), "set marker");
        Ok(())
    }

    fn action(&self, asset: &str, strategy: &str) -> Result<Option<Action>, StrategiseError> {
        Ok(Action::ALL
            .into_iter()
            .find(|a| self.marker_path(*a, asset, strategy).exists()))
    }
}
