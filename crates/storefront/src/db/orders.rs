//! Order repository.
//!
//! Creation is idempotent on the client-supplied key: a double-submitted
//! checkout inserts nothing the second time and returns the order already
//! created for that key. Status writes are deliberately unguarded - any
//! direct transition is accepted, matching the manual payment-confirmation
//! workflow where the seller moves orders out-of-band.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use golazo_core::{CurrencyCode, OrderId, OrderStatus, PaymentMethod, Price};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::cart::CartItem;
use crate::models::discount::AppliedDiscount;
use crate::models::order::{CustomerDetails, NewOrder, Order};

/// Row shape for `storefront.orders`.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer: Json<CustomerDetails>,
    items: Json<Vec<CartItem>>,
    subtotal: Decimal,
    discount_total: Decimal,
    total: Decimal,
    discount_codes: Json<Vec<AppliedDiscount>>,
    status: String,
    payment_method: String,
    payment_reference: Option<String>,
    idempotency_key: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&r.status)
            .map_err(|e| RepositoryError::DataCorruption(format!("order {}: {e}", r.id)))?;
        let payment_method = PaymentMethod::from_str(&r.payment_method)
            .map_err(|e| RepositoryError::DataCorruption(format!("order {}: {e}", r.id)))?;

        Ok(Self {
            id: OrderId::new(r.id),
            customer: r.customer.0,
            items: r.items.0,
            subtotal: Price::new(r.subtotal, CurrencyCode::EUR),
            discount_total: Price::new(r.discount_total, CurrencyCode::EUR),
            total: Price::new(r.total, CurrencyCode::EUR),
            discount_codes: r.discount_codes.0,
            status,
            payment_method,
            payment_reference: r.payment_reference,
            idempotency_key: r.idempotency_key,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, customer, items, subtotal, discount_total, total, \
     discount_codes, status, payment_method, payment_reference, idempotency_key, \
     created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new order with `status = pending`.
    ///
    /// If an order with the same idempotency key already exists, nothing is
    /// inserted and the existing order is returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            INSERT INTO storefront.orders
                (customer, items, subtotal, discount_total, total,
                 discount_codes, status, payment_method, idempotency_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (idempotency_key) DO NOTHING
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(Json(&order.customer))
        .bind(Json(&order.items))
        .bind(order.subtotal.amount)
        .bind(order.discount_total.amount)
        .bind(order.total.amount)
        .bind(Json(&order.discount_codes))
        .bind(OrderStatus::Pending.to_string())
        .bind(order.payment_method.to_string())
        .bind(order.idempotency_key)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => r.try_into(),
            // Conflict: the same checkout was already submitted.
            None => self
                .get_by_idempotency_key(order.idempotency_key)
                .await?
                .ok_or(RepositoryError::NotFound),
        }
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM storefront.orders WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Fetch an order by its client idempotency key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_idempotency_key(
        &self,
        key: Uuid,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM storefront.orders WHERE idempotency_key = $1"
        ))
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Write a new status. No transition guard: any direct write is
    /// accepted, including jumps to terminal states.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist,
    /// `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE storefront.orders SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id.as_i64())
        .bind(status.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Record payment details asserted by the customer (Bizum sender phone
    /// or stub card intent) and move the order to the given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist,
    /// `RepositoryError::Database` if the update fails.
    pub async fn record_payment_reference(
        &self,
        id: OrderId,
        reference: &str,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE storefront.orders
            SET payment_reference = $2, status = $3, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .bind(reference)
        .bind(status.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
