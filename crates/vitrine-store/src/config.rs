//! Store configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_commerce::Currency;

use crate::StoreError;

/// Store configuration file.
///
/// Every section and field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Catalog behavior.
    #[serde(default)]
    pub store: CatalogConfig,

    /// User notification queue.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Cart behavior.
    #[serde(default)]
    pub cart: CartConfig,
}

impl StoreConfig {
    /// Load config from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Parse config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(content)?)
    }
}

/// How the store treats product drafts and patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Accept input as-is; callers are expected to have validated it.
    #[default]
    Trusting,
    /// Reject drafts and patches that fail the admin form checks.
    Strict,
}

/// Catalog section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Currency totals are computed in.
    #[serde(default)]
    pub currency: Currency,

    /// Validation applied by `add_product` and `update_product`.
    #[serde(default)]
    pub validation: ValidationPolicy,

    /// Load the sample catalog in `Store::seeded`.
    #[serde(default = "default_true")]
    pub seed_catalog: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            validation: ValidationPolicy::default(),
            seed_catalog: true,
        }
    }
}

/// Notification section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Maximum queued notifications; the oldest is dropped past this.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// How long the UI should display each notification, in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            duration_ms: default_duration_ms(),
        }
    }
}

/// Cart section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Remove cart entries when their product is deleted from the catalog.
    ///
    /// Off by default: deleted products stay in the cart, priced from the
    /// snapshot taken when they were added.
    #[serde(default)]
    pub prune_deleted_products: bool,
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> usize {
    3
}

fn default_duration_ms() -> u64 {
    4000
}
