//! Catalog filters.

use crate::catalog::{CategoryFilter, Product};
use serde::{Deserialize, Serialize};

/// A predicate over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Restrict to a category ("todos" passes everything).
    Category(CategoryFilter),
    /// Case-insensitive substring match on name, description or category.
    Text(String),
    /// Only featured products.
    Featured,
    /// Only products marked in stock.
    InStock,
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: impl Into<CategoryFilter>) -> Self {
        Filter::Category(category.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(filter) => filter.matches(product.category),
            Filter::Text(query) => text_matches(product, query),
            Filter::Featured => product.featured,
            Filter::InStock => product.in_stock,
        }
    }
}

fn text_matches(product: &Product, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
        || product.category.as_str().contains(&needle)
}
