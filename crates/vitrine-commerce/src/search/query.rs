//! Catalog query builder.

use crate::catalog::{CategoryFilter, Product};
use crate::error::CommerceError;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Most recently created first.
    #[default]
    Newest,
    /// Effective price, low to high.
    PriceLowHigh,
    /// Effective price, high to low.
    PriceHighLow,
    /// Catalog insertion order.
    Catalog,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceLowHigh => "price-low-high",
            SortOption::PriceHighLow => "price-high-low",
            SortOption::Catalog => "catalog",
        }
    }

    /// Sort products in place. Ties keep their catalog order.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOption::PriceLowHigh => products.sort_by_key(|p| p.effective_price().amount_cents),
            SortOption::PriceHighLow => {
                products.sort_by(|a, b| {
                    b.effective_price()
                        .amount_cents
                        .cmp(&a.effective_price().amount_cents)
                })
            }
            SortOption::Catalog => {}
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOption::Newest),
            "price-low-high" => Ok(SortOption::PriceLowHigh),
            "price-high-low" => Ok(SortOption::PriceHighLow),
            "catalog" => Ok(SortOption::Catalog),
            other => Err(CommerceError::Validation(format!(
                "unknown sort option: {}",
                other
            ))),
        }
    }
}

/// A catalog query: filters applied in order, then a sort.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Filters to apply (all must pass).
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Maximum results, if any.
    pub limit: Option<usize>,
}

impl CatalogQuery {
    /// Create an unfiltered query sorted newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// The admin listing: every product in catalog order, optionally searched.
    pub fn admin(search: impl Into<String>) -> Self {
        Self::new()
            .with_text(search)
            .with_sort(SortOption::Catalog)
    }

    /// Restrict to a category. "todos" adds no filter.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        let category = category.into();
        if category != CategoryFilter::Todos {
            self.filters.push(Filter::Category(category));
        }
        self
    }

    /// Set the search text. Blank text adds no filter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.filters.push(Filter::Text(text));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the query over a product list.
    pub fn run<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products
            .iter()
            .filter(|p| self.filters.iter().all(|f| f.matches(p)))
            .collect();
        self.sort.apply(&mut results);
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ProductDraft};
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use chrono::{Duration, TimeZone, Utc};

    fn catalog() -> Vec<Product> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let make = |id: &str, name: &str, price: i64, discount: Option<i64>, category, age_days| {
            let mut draft =
                ProductDraft::new(name, Money::new(price, Currency::BRL), category)
                    .with_description(format!("Descrição de {}", name));
            draft.discount_price = discount.map(|d| Money::new(d, Currency::BRL));
            Product::from_draft(ProductId::new(id), draft, base - Duration::days(age_days))
        };
        vec![
            make("1", "Vestido Floral", 25990, None, Category::Vestidos, 3),
            make("2", "Blusa de Seda", 18990, None, Category::Blusas, 1),
            make("3", "Vestido de Festa", 35990, Some(15000), Category::Vestidos, 2),
            make("4", "Colar", 8990, None, Category::Acessorios, 0),
        ]
    }

    fn ids(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_sort_is_newest() {
        let products = catalog();
        let results = CatalogQuery::new().run(&products);
        assert_eq!(ids(&results), ["4", "2", "3", "1"]);
    }

    #[test]
    fn test_price_sorts_use_effective_price() {
        let products = catalog();
        let low = CatalogQuery::new()
            .with_sort(SortOption::PriceLowHigh)
            .run(&products);
        assert_eq!(ids(&low), ["4", "3", "2", "1"]);

        let high = CatalogQuery::new()
            .with_sort(SortOption::PriceHighLow)
            .run(&products);
        assert_eq!(ids(&high), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_category_and_text_combine() {
        let products = catalog();
        let results = CatalogQuery::new()
            .with_category(Category::Vestidos)
            .with_text("festa")
            .run(&products);
        assert_eq!(ids(&results), ["3"]);

        let all = CatalogQuery::new()
            .with_category(CategoryFilter::Todos)
            .with_text("")
            .run(&products);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_admin_listing_keeps_catalog_order() {
        let products = catalog();
        assert_eq!(ids(&CatalogQuery::admin("").run(&products)), ["1", "2", "3", "4"]);
        assert_eq!(ids(&CatalogQuery::admin("VESTIDO").run(&products)), ["1", "3"]);
    }

    #[test]
    fn test_limit() {
        let products = catalog();
        let results = CatalogQuery::new()
            .with_sort(SortOption::Catalog)
            .with_limit(2)
            .run(&products);
        assert_eq!(ids(&results), ["1", "2"]);
    }

    #[test]
    fn test_sort_option_names() {
        assert_eq!("price-high-low".parse::<SortOption>().unwrap(), SortOption::PriceHighLow);
        assert!("cheapest".parse::<SortOption>().is_err());
        assert_eq!(
            serde_json::to_string(&SortOption::PriceLowHigh).unwrap(),
            "\"price-low-high\""
        );
    }
}
