//! Domain error types.

use std::path::PathBuf;

/// Top-level error type for strategise.
#[derive(Debug, thiserror::Error)]
pub enum StrategiseError {
    #[error("failed to read import file {}: {source}", path.display())]
    ImportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse import file: {reason}")]
    ImportParse { reason: String },

    #[error("invalid price date {date:?} for security {security}")]
    InvalidPriceDate { security: String, date: String },

    #[error("securities {first:?} and {second:?} share the cleaned name {name}")]
    DuplicateAsset {
        name: String,
        first: String,
        second: String,
    },

    #[error("asset not found: {name}")]
    AssetNotFound { name: String },

    #[error("asset has no prices: {name}")]
    EmptyAsset { name: String },

    #[error("report column {column} has {actual} values, expected {expected}")]
    ReportColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StrategiseError {
    pub fn asset_not_found(name: &str) -> Self {
        StrategiseError::AssetNotFound {
            name: name.to_string(),
        }
    }
}

impl From<&StrategiseError> for std::process::ExitCode {
    fn from(err: &StrategiseError) -> Self {
        let code: u8 = match err {
            StrategiseError::Io(_) => 1,
            StrategiseError::ConfigParse { .. }
            | StrategiseError::ConfigMissing { .. }
            | StrategiseError::ConfigInvalid { .. }
            | StrategiseError::UnknownStrategy { .. } => 2,
            StrategiseError::ImportRead { .. }
            | StrategiseError::ImportParse { .. }
            | StrategiseError::InvalidPriceDate { .. }
            | StrategiseError::DuplicateAsset { .. } => 3,
            StrategiseError::AssetNotFound { .. } | StrategiseError::EmptyAsset { .. } => 5,
            StrategiseError::ReportColumnLength { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
