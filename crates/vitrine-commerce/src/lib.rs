//! Catalog, cart and pricing domain types for the Vitrine storefront.
//!
//! - **Catalog**: products, admin drafts and patches, the fixed category set
//! - **Cart**: one entry per product, priced from the live catalog
//! - **Search**: category/text filters and the listing sorts
//!
//! Every price shown or totaled goes through [`Product::effective_price`].
//!
//! # Example
//!
//! ```rust
//! use vitrine_commerce::prelude::*;
//! use chrono::Utc;
//!
//! let draft = ProductDraft::new("Vestido de Festa", Money::from_decimal(359.90, Currency::BRL), Category::Vestidos)
//!     .with_discount_price(Money::from_decimal(299.90, Currency::BRL));
//! let product = Product::from_draft(ProductId::generate(), draft, Utc::now());
//!
//! let mut cart = Cart::new();
//! cart.add(&product, 2).unwrap();
//!
//! let catalog = vec![product];
//! assert_eq!(cart.total_price(&catalog, Currency::BRL).display(), "R$ 599,80");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use cart::{Cart, CartItem, CartPricing, LinePricing};
pub use catalog::{Category, CategoryFilter, Product, ProductDraft, ProductPatch};
pub use search::{CatalogQuery, Filter, SortOption};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    pub use crate::catalog::{Category, CategoryFilter, Product, ProductDraft, ProductPatch};

    pub use crate::cart::{Cart, CartItem, CartPricing, LinePricing};

    pub use crate::search::{CatalogQuery, Filter, SortOption};
}
