//! Product categories.
//!
//! The storefront has a fixed set of five categories. The "todos" entry
//! users see in the category bar is a filter meaning "all categories", so it
//! lives on [`CategoryFilter`] and can never be assigned to a product.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category a product can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "vestidos")]
    Vestidos,
    #[serde(rename = "saias")]
    Saias,
    #[serde(rename = "blusas")]
    Blusas,
    #[serde(rename = "calças")]
    Calcas,
    #[serde(rename = "acessórios")]
    Acessorios,
}

impl Category {
    /// Every assignable category, in menu order.
    pub const ALL: [Category; 5] = [
        Category::Vestidos,
        Category::Saias,
        Category::Blusas,
        Category::Calcas,
        Category::Acessorios,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vestidos => "vestidos",
            Category::Saias => "saias",
            Category::Blusas => "blusas",
            Category::Calcas => "calças",
            Category::Acessorios => "acessórios",
        }
    }

    /// Capitalized name for headings and menu entries (e.g., "Calças").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vestidos => "Vestidos",
            Category::Saias => "Saias",
            Category::Blusas => "Blusas",
            Category::Calcas => "Calças",
            Category::Acessorios => "Acessórios",
        }
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category selection for browsing: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// "todos": no category restriction.
    #[default]
    Todos,
    /// Only products in this category.
    Only(Category),
}

impl CategoryFilter {
    /// The category list exposed to views: "todos" first, then every category.
    pub const ALL: [CategoryFilter; 6] = [
        CategoryFilter::Todos,
        CategoryFilter::Only(Category::Vestidos),
        CategoryFilter::Only(Category::Saias),
        CategoryFilter::Only(Category::Blusas),
        CategoryFilter::Only(Category::Calcas),
        CategoryFilter::Only(Category::Acessorios),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::Todos => "todos",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::Todos => "Todos",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// Check whether a product category passes this filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::Todos => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// The concrete category, if this is not "todos".
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::Todos => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c)
    }
}

impl FromStr for CategoryFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("todos") {
            return Ok(CategoryFilter::Todos);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CommerceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(f: CategoryFilter) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accented_names() {
        assert_eq!("calças".parse::<Category>().unwrap(), Category::Calcas);
        assert_eq!("Acessórios".parse::<Category>().unwrap(), Category::Acessorios);
        assert!("calcas".parse::<Category>().is_err());
    }

    #[test]
    fn test_todos_is_not_a_product_category() {
        let err = "todos".parse::<Category>().unwrap_err();
        assert_eq!(err, CommerceError::UnknownCategory("todos".to_string()));
        assert_eq!("todos".parse::<CategoryFilter>().unwrap(), CategoryFilter::Todos);
    }

    #[test]
    fn test_filter_list_order() {
        let names: Vec<&str> = CategoryFilter::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            ["todos", "vestidos", "saias", "blusas", "calças", "acessórios"]
        );
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::Todos.matches(Category::Saias));
        assert!(CategoryFilter::Only(Category::Saias).matches(Category::Saias));
        assert!(!CategoryFilter::Only(Category::Saias).matches(Category::Blusas));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Category::Acessorios).unwrap();
        assert_eq!(json, "\"acessórios\"");

        let filter: CategoryFilter = serde_json::from_str("\"todos\"").unwrap();
        assert_eq!(filter, CategoryFilter::Todos);
        let filter: CategoryFilter = serde_json::from_str("\"calças\"").unwrap();
        assert_eq!(filter, CategoryFilter::Only(Category::Calcas));
        assert!(serde_json::from_str::<CategoryFilter>("\"sapatos\"").is_err());
    }
}
