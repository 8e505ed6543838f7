//! Product, draft and patch types.

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier. Never changes after creation.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Base price.
    pub price: Money,
    /// Sale price. Only honored when `0 < discount_price < price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Money>,
    /// Image URL.
    pub image: String,
    /// Category the product is listed under.
    pub category: Category,
    /// Shown on the landing page.
    pub featured: bool,
    /// Available for purchase.
    pub in_stock: bool,
    /// When the product was added to the catalog. Never changes after creation.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a draft with store-assigned identity.
    pub fn from_draft(id: ProductId, draft: ProductDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            discount_price: draft.discount_price,
            image: draft.image,
            category: draft.category,
            featured: draft.featured,
            in_stock: draft.in_stock,
            created_at,
        }
    }

    /// The discount price, if it is a real discount on this product.
    pub fn valid_discount(&self) -> Option<Money> {
        self.discount_price
            .filter(|d| is_valid_discount(d, &self.price))
    }

    /// The price the customer pays: the valid discount price, else the base price.
    ///
    /// Every listing, sort and cart total goes through this.
    pub fn effective_price(&self) -> Money {
        self.valid_discount().unwrap_or(self.price)
    }

    /// Check if the product carries a valid discount ("Oferta").
    pub fn is_on_sale(&self) -> bool {
        self.valid_discount().is_some()
    }

    /// Percentage off the base price, if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.valid_discount().map(|d| {
            let savings = self.price.amount_cents - d.amount_cents;
            (savings as f64 / self.price.amount_cents as f64) * 100.0
        })
    }

    /// Merge a patch onto this product. `id` and `created_at` are not patchable.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(discount_price) = patch.discount_price {
            self.discount_price = discount_price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
    }
}

fn is_valid_discount(discount: &Money, price: &Money) -> bool {
    discount.currency == price.currency
        && discount.is_positive()
        && discount.amount_cents < price.amount_cents
}

/// Every product field except the ones the store assigns (id, created_at).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub discount_price: Option<Money>,
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl ProductDraft {
    /// Start a draft with the fields every product needs a value for.
    ///
    /// Description and image start empty; the product is in stock and not featured.
    pub fn new(name: impl Into<String>, price: Money, category: Category) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            discount_price: None,
            image: String::new(),
            category,
            featured: false,
            in_stock: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_discount_price(mut self, discount_price: Money) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Admin form checks: required text fields present and a positive price.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.image.trim().is_empty() {
            missing.push("image");
        }
        if !missing.is_empty() {
            return Err(CommerceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        if !self.price.is_positive() {
            return Err(CommerceError::Validation(format!(
                "price must be greater than zero, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Drop a discount price that is not strictly between zero and the price.
    pub fn normalized(mut self) -> Self {
        if let Some(d) = self.discount_price {
            if !is_valid_discount(&d, &self.price) {
                self.discount_price = None;
            }
        }
        self
    }
}

/// A partial update. `None` leaves a field as is.
///
/// `discount_price` is doubly optional: `Some(None)` clears the discount.
/// On the wire an absent key leaves it alone and `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_price: Option<Option<Money>>,
    pub image: Option<String>,
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
}

/// A present key, `null` included, deserializes to `Some`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<Money>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Money>::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_discount_price(mut self, discount_price: Money) -> Self {
        self.discount_price = Some(Some(discount_price));
        self
    }

    pub fn clear_discount_price(mut self) -> Self {
        self.discount_price = Some(None);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Check if the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validate the result of applying this patch to `current`.
    pub fn validate_against(&self, current: &Product) -> Result<(), CommerceError> {
        let mut merged = current.clone();
        merged.apply_patch(self.clone());
        ProductDraft {
            name: merged.name,
            description: merged.description,
            price: merged.price,
            discount_price: merged.discount_price,
            image: merged.image,
            category: merged.category,
            featured: merged.featured,
            in_stock: merged.in_stock,
        }
        .validate()
    }
}
