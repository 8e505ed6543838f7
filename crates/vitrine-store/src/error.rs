//! Store error types.

use std::path::PathBuf;

use thiserror::Error;
use vitrine_commerce::CommerceError;

/// Errors surfaced by the store and its configuration.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A domain rule was violated (only raised under strict validation).
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("failed to parse config: {0}")]
    ConfigParse(String),
}

impl StoreError {
    /// Check if this is a rejected product draft or patch.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Commerce(e) if e.is_validation())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        StoreError::ConfigParse(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::ConfigParse(e.to_string())
    }
}
