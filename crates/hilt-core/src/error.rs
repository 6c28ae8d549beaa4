//! Error types for Hiltsmith

use thiserror::Error;

/// The main error type for Hiltsmith operations
#[derive(Debug, Error)]
pub enum HiltError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    #[error("Unknown part category: {0}")]
    UnknownCategory(String),

    #[error("Slot {0} is mandatory and cannot be hidden")]
    MandatorySlot(String),

    #[error("Blade slot has no finish")]
    BladeFinish,

    #[error("Instrument {index} out of range (config has {count})")]
    InstrumentOutOfRange { index: usize, count: usize },

    #[error("Invalid dimension for {asset}: {message}")]
    InvalidDimension { asset: String, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Hiltsmith operations
pub type Result<T> = std::result::Result<T, HiltError>;

impl From<toml::de::Error> for HiltError {
    fn from(err: toml::de::Error) -> Self {
        HiltError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for HiltError {
    fn from(err: toml::ser::Error) -> Self {
        HiltError::TomlSerError(err.to_string())
    }
}
