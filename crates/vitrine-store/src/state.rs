//! The data the store owns.

use serde::{Deserialize, Serialize};
use vitrine_commerce::{Cart, CategoryFilter, Product, ProductId};

/// Products and cart, as seen by listeners and snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    /// Catalog in insertion order.
    pub products: Vec<Product>,
    /// The session's cart.
    pub cart: Cart,
}

impl StoreState {
    /// The fixed category list, "todos" first.
    pub fn categories(&self) -> &'static [CategoryFilter] {
        &CategoryFilter::ALL
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub(crate) fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| &p.id == id)
    }
}
