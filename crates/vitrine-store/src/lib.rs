//! Single-instance catalog and cart store for the Vitrine storefront.
//!
//! This crate provides:
//! - [`Store`]: products, cart, and the eight mutations views call
//! - [`StoreConfig`]: TOML/JSON configuration with defaults for every field
//! - Observers ([`Store::subscribe`]) for re-rendering on change
//! - A [`NotificationQueue`] of transient user messages
//!
//! Logging goes through `tracing`; installing a subscriber is left to the
//! embedding application.

mod config;
mod error;
mod notify;
mod observer;
mod seed;
mod state;
mod store;

pub use config::{CartConfig, CatalogConfig, NotificationConfig, StoreConfig, ValidationPolicy};
pub use error::StoreError;
pub use notify::{Notification, NotificationQueue, Severity};
pub use observer::{Listener, Observers, StoreEvent, SubscriptionId};
pub use seed::sample_products;
pub use state::StoreState;
pub use store::Store;
