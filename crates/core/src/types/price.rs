//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are stored in the currency's standard unit (e.g., euros, not
/// cents) and use [`Decimal`] arithmetic throughout so cart totals never
/// accumulate floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a euro price (the shop's operating currency).
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::EUR)
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Add another price in the same currency.
    ///
    /// Mixed-currency addition keeps the left-hand currency; the shop
    /// operates in a single currency so this does not occur in practice.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(self.amount + other.amount, self.currency_code)
    }
}

impl Default for Price {
    /// Zero in the shop's operating currency.
    fn default() -> Self {
        Self::zero(CurrencyCode::EUR)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_code {
            CurrencyCode::EUR => write!(f, "{:.2} €", self.amount),
            _ => write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_times_and_plus() {
        let unit = Price::eur(dec!(19.95));
        let line = unit.times(3);
        assert_eq!(line.amount, dec!(59.85));

        let surcharge = Price::eur(dec!(5));
        assert_eq!(line.plus(&surcharge).amount, dec!(64.85));
    }

    #[test]
    fn test_display_eur() {
        assert_eq!(Price::eur(dec!(85)).to_string(), "85.00 €");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::eur(dec!(24.99));
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
