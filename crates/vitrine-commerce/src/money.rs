//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's smallest unit (centavos for BRL),
//! so totals never pick up floating-point drift. Arithmetic used by cart
//! totals saturates instead of overflowing.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Brazilian real, the storefront's home currency.
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of decimal places in the smallest unit.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    fn decimal_separator(&self) -> char {
        match self {
            Currency::USD => '.',
            Currency::BRL | Currency::EUR => ',',
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Currency::USD => ',',
            Currency::BRL | Currency::EUR => '.',
        }
    }

    fn spaced_symbol(&self) -> bool {
        matches!(self, Currency::BRL | Currency::EUR)
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl FromStr for Currency {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CommerceError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use vitrine_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(259.90, Currency::BRL);
    /// assert_eq!(price.amount_cents, 25990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Like [`Money::from_decimal`] but rejects NaN, infinite and negative input.
    pub fn try_from_decimal(amount: f64, currency: Currency) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidPrice(amount.to_string()));
        }
        Ok(Self::from_decimal(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format with symbol in the currency's locale (e.g., "R$ 1.259,90").
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let space = if self.currency.spaced_symbol() { " " } else { "" };
        format!(
            "{}{}{}{}",
            sign,
            self.currency.symbol(),
            space,
            self.display_amount()
        )
    }

    /// Format the absolute amount without symbol (e.g., "1.259,90").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_cents.unsigned_abs();

        let mut out = group_digits(abs / divisor, self.currency.group_separator());
        if places > 0 {
            out.push(self.currency.decimal_separator());
            out.push_str(&format!(
                "{:0width$}",
                abs % divisor,
                width = places as usize
            ));
        }
        out
    }

    /// Try to add another amount, returning None if currencies don't match.
    ///
    /// The amount saturates at the i64 bounds.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Try to subtract another amount, returning None if currencies don't match.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a quantity, saturating at the i64 bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Sum the values priced in `currency`, skipping the rest.
    ///
    /// Returns the total and how many values were skipped.
    pub fn sum_in<'a>(currency: Currency, iter: impl Iterator<Item = &'a Money>) -> (Money, usize) {
        iter.fold((Money::zero(currency), 0), |(acc, skipped), m| match acc.try_add(m) {
            Some(total) => (total, skipped),
            None => (acc, skipped + 1),
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_digits(mut units: u64, separator: char) -> String {
    let mut groups = Vec::new();
    loop {
        if units < 1000 {
            groups.push(units.to_string());
            break;
        }
        groups.push(format!("{:03}", units % 1000));
        units /= 1000;
    }
    groups.reverse();
    groups.join(&separator.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(259.90, Currency::BRL).amount_cents, 25990);
        assert_eq!(Money::from_decimal(89.9, Currency::BRL).amount_cents, 8990);
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::BRL).amount_cents, 30);
    }

    #[test]
    fn test_try_from_decimal_rejects_garbage() {
        assert!(Money::try_from_decimal(f64::NAN, Currency::BRL).is_err());
        assert!(Money::try_from_decimal(-1.0, Currency::BRL).is_err());
        assert!(Money::try_from_decimal(0.0, Currency::BRL).is_ok());
    }

    #[test]
    fn test_money_display_brl() {
        assert_eq!(Money::new(25990, Currency::BRL).display(), "R$ 259,90");
        assert_eq!(Money::new(125990, Currency::BRL).display(), "R$ 1.259,90");
        assert_eq!(Money::new(5, Currency::BRL).display(), "R$ 0,05");
        assert_eq!(Money::new(-1000, Currency::BRL).display(), "-R$ 10,00");
    }

    #[test]
    fn test_money_display_usd() {
        assert_eq!(Money::new(123456789, Currency::USD).display(), "$1,234,567.89");
    }

    #[test]
    fn test_saturating_arithmetic() {
        let m = Money::new(i64::MAX - 1, Currency::BRL);
        assert_eq!(m.saturating_mul(3).amount_cents, i64::MAX);
        assert_eq!(
            m.try_add(&Money::new(10, Currency::BRL)).unwrap().amount_cents,
            i64::MAX
        );
        assert_eq!(Money::new(1000, Currency::BRL).saturating_mul(3).amount_cents, 3000);
    }

    #[test]
    fn test_currency_mismatch() {
        let brl = Money::new(10000, Currency::BRL);
        let usd = Money::new(10000, Currency::USD);
        assert!(brl.try_add(&usd).is_none());
        assert!(brl.try_subtract(&usd).is_none());
        assert_eq!(
            brl.try_subtract(&Money::new(2500, Currency::BRL)),
            Some(Money::new(7500, Currency::BRL))
        );
    }

    #[test]
    fn test_sum_in() {
        let values = [
            Money::new(20000, Currency::BRL),
            Money::new(12000, Currency::BRL),
        ];
        let (total, skipped) = Money::sum_in(Currency::BRL, values.iter());
        assert_eq!(total.amount_cents, 32000);
        assert_eq!(skipped, 0);
        assert_eq!(
            Money::sum_in(Currency::BRL, std::iter::empty()),
            (Money::zero(Currency::BRL), 0)
        );
    }

    #[test]
    fn test_sum_in_skips_other_currencies() {
        let values = [
            Money::new(10000, Currency::BRL),
            Money::new(10000, Currency::USD),
        ];
        let (total, skipped) = Money::sum_in(Currency::BRL, values.iter());
        assert_eq!(total, Money::new(10000, Currency::BRL));
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("brl"), Some(Currency::BRL));
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::EUR);
        assert!("XYZ".parse::<Currency>().is_err());
    }
}
