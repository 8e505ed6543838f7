//! Commerce error types.

use thiserror::Error;

/// Errors raised by catalog and cart domain logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// A product draft or patch failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A category name outside the closed set.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A currency code we do not price in.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A cart quantity that must be positive was not.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A price that cannot be represented (negative, NaN, infinite).
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

impl CommerceError {
    /// Check if this error came from draft/patch validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, CommerceError::Validation(_))
    }
}
