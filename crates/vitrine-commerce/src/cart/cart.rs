//! Cart and cart entry types.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart: at most one entry per product, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing entry for the same product grows by `quantity` and keeps
    /// its position; otherwise a new entry is appended. There is no upper
    /// bound and no stock check. Returns the entry's new quantity.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<i64, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.snapshot = product.clone();
            return Ok(existing.quantity);
        }

        self.items.push(CartItem::new(product.clone(), quantity));
        Ok(quantity)
    }

    /// Set an entry's quantity.
    ///
    /// A quantity of zero or less removes the entry. Returns whether an
    /// entry was found.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the entry for a product.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop entries whose product is no longer in `catalog`.
    ///
    /// Returns the number of entries dropped.
    pub fn retain_listed(&mut self, catalog: &[Product]) -> usize {
        let len_before = self.items.len();
        self.items.retain(|i| i.live(catalog).is_some());
        len_before - self.items.len()
    }

    /// Total units across entries (not the number of entries).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the entry for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Sum of effective price × quantity, read from the live catalog.
    ///
    /// Entries priced in a currency other than `currency` are left out; see
    /// [`CartPricing::foreign_lines`].
    pub fn total_price(&self, catalog: &[Product], currency: Currency) -> Money {
        let totals: Vec<Money> = self.items.iter().map(|i| i.line_total(catalog)).collect();
        Money::sum_in(currency, totals.iter()).0
    }

    /// Per-entry pricing breakdown, read from the live catalog.
    pub fn pricing(&self, catalog: &[Product], currency: Currency) -> CartPricing {
        let lines: Vec<LinePricing> = self
            .items
            .iter()
            .map(|item| {
                let product = item.resolve(catalog);
                LinePricing {
                    product_id: item.product_id.clone(),
                    name: product.name.clone(),
                    list_price: product.price,
                    unit_price: product.effective_price(),
                    quantity: item.quantity,
                    total: item.line_total(catalog),
                    delisted: item.live(catalog).is_none(),
                }
            })
            .collect();

        CartPricing {
            subtotal: Money::sum_in(currency, lines.iter().map(|l| &l.total)).0,
            item_count: self.item_count(),
            lines,
        }
    }
}

/// One product in the cart with its requested quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// The product this entry refers to.
    pub product_id: ProductId,
    /// Requested units, always positive.
    pub quantity: i64,
    /// The product as last handed to the cart. Pricing only falls back to it
    /// when the product has been deleted from the catalog.
    pub snapshot: Product,
}

impl CartItem {
    fn new(product: Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity,
            snapshot: product,
        }
    }

    /// The catalog's current version of this product, if it is still listed.
    pub fn live<'a>(&self, catalog: &'a [Product]) -> Option<&'a Product> {
        catalog.iter().find(|p| p.id == self.product_id)
    }

    /// The live product, or the snapshot when it has been deleted.
    pub fn resolve<'a>(&'a self, catalog: &'a [Product]) -> &'a Product {
        self.live(catalog).unwrap_or(&self.snapshot)
    }

    /// Effective unit price × quantity.
    pub fn line_total(&self, catalog: &[Product]) -> Money {
        self.resolve(catalog)
            .effective_price()
            .saturating_mul(self.quantity)
    }
}
