//! Discount code registry.
//!
//! Answers "is this code currently usable, and by how much" and records
//! redemptions for statistics. The stored `max_uses` cap is advisory and
//! never gates a redemption; only `is_active` does. Check and redeem never
//! fail outward: infrastructure errors degrade to a neutral rejection or a
//! false return so the checkout flow can always render a message.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use crate::db::DiscountRepository;
use crate::models::{Discount, DiscountStatus};

/// Sentinel for "effectively unlimited" uses on seeded codes.
pub const UNLIMITED_USES: i64 = 1_000_000;

/// Launch codes ensured at every startup.
pub const DEFAULT_CODES: &[(&str, u32)] = &[
    ("BIENVENIDO15", 15),
    ("PROMO15", 15),
    ("EQUIPO10", 10),
];

/// Normalize user input to the stored key form.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// True when `percentage` is a valid discount fraction, in (0, 100].
#[must_use]
pub fn valid_percentage(percentage: Decimal) -> bool {
    percentage > Decimal::ZERO && percentage <= Decimal::from(100)
}

/// Discount code registry service.
#[derive(Clone)]
pub struct DiscountService {
    pool: PgPool,
}

impl DiscountService {
    /// Create a new discount service.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check whether a code is currently usable.
    ///
    /// Lookup is case-insensitive (input is uppercased). An active code is
    /// valid regardless of how `current_uses` compares to `max_uses`.
    /// Read failures are logged and reported as an invalid status with a
    /// generic message; this method never returns an error.
    #[instrument(skip(self))]
    pub async fn check_status(&self, code: &str) -> DiscountStatus {
        let code = normalize_code(code);
        if code.is_empty() {
            return DiscountStatus::invalid("Introduce un código de descuento");
        }

        let repo = DiscountRepository::new(&self.pool);
        match repo.get(&code).await {
            Ok(None) => DiscountStatus::invalid("El código no es válido"),
            Ok(Some(discount)) if !discount.is_active => {
                DiscountStatus::invalid("El código ya no está activo")
            }
            Ok(Some(discount)) => DiscountStatus::valid(
                discount.percentage,
                format!("Código aplicado: {}% de descuento", discount.percentage),
            ),
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "Discount status check failed");
                DiscountStatus::invalid("No se pudo comprobar el código, inténtalo de nuevo")
            }
        }
    }

    /// Create or refresh a code. Returns false on validation failure or
    /// write error; never returns an error.
    ///
    /// The upsert is idempotent: an existing code keeps its redemption
    /// statistics and gets its percentage, cap and active flag patched.
    #[instrument(skip(self))]
    pub async fn create(&self, code: &str, percentage: Decimal, max_uses: Option<i64>) -> bool {
        let code = normalize_code(code);
        if code.is_empty() {
            tracing::warn!("Refusing to create discount with empty code");
            return false;
        }
        if !valid_percentage(percentage) {
            tracing::warn!(code = %code, %percentage, "Refusing to create discount with out-of-range percentage");
            return false;
        }

        let repo = DiscountRepository::new(&self.pool);
        match repo
            .upsert(&code, percentage, max_uses.unwrap_or(UNLIMITED_USES))
            .await
        {
            Ok(_) => {
                tracing::info!(code = %code, %percentage, "Discount code upserted");
                true
            }
            Err(e) => {
                tracing::error!(code = %code, error = %e, "Failed to upsert discount code");
                false
            }
        }
    }

    /// Record a redemption for statistics. Returns false when the code does
    /// not exist or the write fails; never returns an error.
    ///
    /// The redeemer id is set-unioned into `used_by` and the counter is
    /// incremented atomically. No cap is checked - a code can be redeemed
    /// past its `max_uses`.
    #[instrument(skip(self))]
    pub async fn redeem(&self, code: &str, redeemer_id: &str) -> bool {
        let code = normalize_code(code);
        let repo = DiscountRepository::new(&self.pool);
        match repo.record_redemption(&code, redeemer_id).await {
            Ok(recorded) => {
                if !recorded {
                    tracing::warn!(code = %code, "Redemption recorded for unknown code");
                }
                recorded
            }
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "Failed to record redemption");
                false
            }
        }
    }

    /// Deactivate a code so further checks reject it.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, code: &str) -> bool {
        let code = normalize_code(code);
        let repo = DiscountRepository::new(&self.pool);
        match repo.set_active(&code, false).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "Failed to deactivate code");
                false
            }
        }
    }

    /// Ensure the launch codes exist, active and effectively unlimited.
    ///
    /// Runs at startup and is safe to repeat: seeding reuses the idempotent
    /// upsert, so statistics on existing codes survive. Individual failures
    /// are logged and do not stop the rest of the seed.
    #[instrument(skip(self))]
    pub async fn setup_defaults(&self) {
        for &(code, percentage) in DEFAULT_CODES {
            let created = self
                .create(code, Decimal::from(percentage), Some(UNLIMITED_USES))
                .await;
            if !created {
                tracing::error!(code, "Failed to seed default discount code");
            }
        }
    }

    /// List all codes with redemption statistics (CLI/reporting).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails - unlike the checkout
    /// paths this surface is operator-facing and wants the real error.
    pub async fn list(&self) -> Result<Vec<Discount>, crate::db::RepositoryError> {
        DiscountRepository::new(&self.pool).list().await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_normalize_code_uppercases_and_trims() {
        assert_eq!(normalize_code("promo15"), "PROMO15");
        assert_eq!(normalize_code("  Promo15  "), "PROMO15");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(valid_percentage(dec!(0.5)));
        assert!(valid_percentage(dec!(15)));
        assert!(valid_percentage(dec!(100)));
        assert!(!valid_percentage(dec!(0)));
        assert!(!valid_percentage(dec!(-5)));
        assert!(!valid_percentage(dec!(100.01)));
    }

    #[test]
    fn test_default_codes_have_valid_percentages() {
        for &(code, percentage) in DEFAULT_CODES {
            assert_eq!(code, normalize_code(code), "seed codes must be stored normalized");
            assert!(valid_percentage(Decimal::from(percentage)));
        }
    }
}
