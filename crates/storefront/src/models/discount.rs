//! Discount code models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored discount code.
///
/// `max_uses` is advisory: it is recorded and reported, but redemption is
/// not gated on it. `current_uses` and `used_by` exist for statistics only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    /// Uppercased code string, the primary key.
    pub code: String,
    /// Percentage off the order subtotal, in (0, 100].
    pub percentage: Decimal,
    /// Nominal usage cap. Never enforced; a large sentinel means unlimited.
    pub max_uses: i64,
    /// Number of recorded redemptions.
    pub current_uses: i64,
    /// Distinct redeemer identifiers, set-union on append.
    pub used_by: Vec<String>,
    /// Inactive codes are rejected regardless of remaining uses.
    pub is_active: bool,
    /// When the code was first created.
    pub created_at: DateTime<Utc>,
    /// Last admin edit or redemption.
    pub updated_at: DateTime<Utc>,
}

/// Result of checking a code at the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountStatus {
    /// Whether the code can be applied right now.
    pub is_valid: bool,
    /// Percentage granted when valid, zero otherwise.
    pub percentage: Decimal,
    /// User-facing explanation.
    pub message: String,
}

impl DiscountStatus {
    /// A rejection with zero percentage.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            percentage: Decimal::ZERO,
            message: message.into(),
        }
    }

    /// An acceptance carrying the stored percentage.
    #[must_use]
    pub fn valid(percentage: Decimal, message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            percentage,
            message: message.into(),
        }
    }
}

/// A code applied to the current checkout, with the percentage it granted.
///
/// The percentage is captured at apply time and persisted alongside the code
/// (in the session and on the order record) so that removing one stacked code
/// recomputes the remaining discount exactly, whatever mix of percentages is
/// in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// Normalized (uppercased) code string.
    pub code: String,
    /// Percentage this code granted when it was applied.
    pub percentage: Decimal,
}
