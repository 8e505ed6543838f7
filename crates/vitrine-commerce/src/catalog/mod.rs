//! Product catalog module.
//!
//! Contains products, the drafts and patches the admin panel submits, and
//! the fixed category set.

mod category;
mod product;

pub use category::{Category, CategoryFilter};
pub use product::{Product, ProductDraft, ProductPatch};
