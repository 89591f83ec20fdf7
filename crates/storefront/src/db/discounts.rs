//! Discount repository.
//!
//! Codes are keyed by their uppercased string. Redemption bookkeeping is a
//! single atomic UPDATE (counter increment plus array set-union), so
//! concurrent redemptions of the same code cannot lose updates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Discount;

/// Row shape for `storefront.discounts`.
#[derive(sqlx::FromRow)]
struct DiscountRow {
    code: String,
    percentage: Decimal,
    max_uses: i64,
    current_uses: i64,
    used_by: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DiscountRow> for Discount {
    fn from(r: DiscountRow) -> Self {
        Self {
            code: r.code,
            percentage: r.percentage,
            max_uses: r.max_uses,
            current_uses: r.current_uses,
            used_by: r.used_by,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const DISCOUNT_COLUMNS: &str =
    "code, percentage, max_uses, current_uses, used_by, is_active, created_at, updated_at";

/// Repository for discount database operations.
pub struct DiscountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DiscountRepository<'a> {
    /// Create a new discount repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a code. The caller is expected to pass an already-normalized
    /// (uppercased) code string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, code: &str) -> Result<Option<Discount>, RepositoryError> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM storefront.discounts WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Discount::from))
    }

    /// Idempotent upsert: create the code if absent, otherwise patch
    /// `percentage`, `max_uses` and re-activate it. Redemption statistics
    /// (`current_uses`, `used_by`) are never reset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn upsert(
        &self,
        code: &str,
        percentage: Decimal,
        max_uses: i64,
    ) -> Result<Discount, RepositoryError> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            r"
            INSERT INTO storefront.discounts (code, percentage, max_uses)
            VALUES ($1, $2, $3)
            ON CONFLICT (code) DO UPDATE
            SET percentage = EXCLUDED.percentage,
                max_uses = EXCLUDED.max_uses,
                is_active = TRUE,
                updated_at = now()
            RETURNING {DISCOUNT_COLUMNS}
            "
        ))
        .bind(code)
        .bind(percentage)
        .bind(max_uses)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Record a redemption: increment `current_uses` and set-union the
    /// redeemer id into `used_by`, in one statement. Duplicate redeemer ids
    /// do not grow the array. No usage-cap check is made here - redemptions
    /// are unbounded by contract.
    ///
    /// Returns false when the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn record_redemption(
        &self,
        code: &str,
        redeemer_id: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE storefront.discounts
            SET current_uses = current_uses + 1,
                used_by = CASE
                    WHEN $2 = ANY(used_by) THEN used_by
                    ELSE array_append(used_by, $2)
                END,
                updated_at = now()
            WHERE code = $1
            ",
        )
        .bind(code)
        .bind(redeemer_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Activate or deactivate a code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the code does not exist,
    /// `RepositoryError::Database` if the update fails.
    pub async fn set_active(&self, code: &str, is_active: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE storefront.discounts SET is_active = $2, updated_at = now() WHERE code = $1",
        )
        .bind(code)
        .bind(is_active)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// List all codes with their redemption statistics, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Discount>, RepositoryError> {
        let rows = sqlx::query_as::<_, DiscountRow>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM storefront.discounts ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Discount::from).collect())
    }
}
