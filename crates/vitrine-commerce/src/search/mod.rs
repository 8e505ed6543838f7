//! Search module.
//!
//! In-memory filtering and sorting of the product listing.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{CatalogQuery, SortOption};
