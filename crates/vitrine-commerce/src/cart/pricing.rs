//! Cart pricing breakdown.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing for a whole cart, as shown in the cart drawer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of the line totals priced in the store currency. Taxes and
    /// shipping are settled at checkout.
    pub subtotal: Money,
    /// Total units across lines.
    pub item_count: i64,
    /// One line per cart entry, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    /// What the customer saves against base prices.
    pub fn savings(&self) -> Money {
        let savings: Vec<Money> = self.lines.iter().map(LinePricing::savings).collect();
        Money::sum_in(self.subtotal.currency, savings.iter()).0
    }

    /// Lines left out of the subtotal because they are priced in another currency.
    pub fn foreign_lines(&self) -> impl Iterator<Item = &LinePricing> {
        let currency = self.subtotal.currency;
        self.lines.iter().filter(move |l| l.total.currency != currency)
    }

    /// Check if any line is priced at a discount.
    pub fn has_discounts(&self) -> bool {
        self.lines.iter().any(|l| l.unit_price != l.list_price)
    }

    /// Check if any line refers to a product no longer in the catalog.
    pub fn has_delisted(&self) -> bool {
        self.lines.iter().any(|l| l.delisted)
    }
}

/// Pricing for a single cart entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub product_id: ProductId,
    /// Product name at pricing time.
    pub name: String,
    /// Base price.
    pub list_price: Money,
    /// Effective price actually charged per unit.
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price × quantity.
    pub total: Money,
    /// Priced from the cart's snapshot because the product was deleted.
    pub delisted: bool,
}

impl LinePricing {
    pub fn savings(&self) -> Money {
        self.list_price
            .try_subtract(&self.unit_price)
            .map_or(Money::zero(self.list_price.currency), |d| {
                d.saturating_mul(self.quantity)
            })
    }
}
