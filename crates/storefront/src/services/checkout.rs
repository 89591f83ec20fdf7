//! Checkout orchestration: discount stacking, order assembly, payment dispatch.
//!
//! Discount codes are applied client-session-side and stored with the
//! percentage they granted, so removing one stacked code recomputes the
//! remaining discount exactly whatever mix of percentages is applied.
//! Order persistence retries transient failures with exponential backoff;
//! the caller keeps the cart until persistence succeeds.

use std::time::Duration;

use golazo_core::{OrderId, OrderStatus, PaymentMethod, Price};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::ShopConfig;
use crate::db::{OrderRepository, RepositoryError};
use crate::models::cart::Cart;
use crate::models::discount::AppliedDiscount;
use crate::models::order::{CustomerDetails, NewOrder, Order};
use crate::services::notify::{self, PaymentInstructions};

/// Total attempts for the order write, including the first.
const ORDER_WRITE_ATTEMPTS: u32 = 3;

/// Base delay for the exponential backoff between attempts.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Errors from checkout operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart has no items to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The order could not be persisted after all retries.
    #[error("order could not be saved: {0}")]
    Persistence(#[from] RepositoryError),

    /// The referenced order does not exist.
    #[error("order not found")]
    OrderNotFound,
}

/// Result of a successful checkout submission.
#[derive(Debug)]
pub struct CheckoutOutcome {
    /// The persisted order.
    pub order: Order,
    /// Channel-specific payment instructions for the client.
    pub payment: PaymentInstructions,
}

// =============================================================================
// Discount stacking
// =============================================================================

/// Add a checked code to the applied list.
///
/// Returns false when the code is already applied - a code can only be
/// counted once per checkout, enforced by list membership.
pub fn apply_code(applied: &mut Vec<AppliedDiscount>, code: &str, percentage: Decimal) -> bool {
    if applied.iter().any(|d| d.code == code) {
        return false;
    }
    applied.push(AppliedDiscount {
        code: code.to_string(),
        percentage,
    });
    true
}

/// Remove a code from the applied list. Returns false when it was not applied.
pub fn remove_code(applied: &mut Vec<AppliedDiscount>, code: &str) -> bool {
    let before = applied.len();
    applied.retain(|d| d.code != code);
    applied.len() != before
}

/// Total discount granted by the applied codes against a subtotal.
///
/// Each code contributes `subtotal * percentage / 100`, using its own stored
/// percentage.
#[must_use]
pub fn discount_total(subtotal: Price, applied: &[AppliedDiscount]) -> Price {
    let hundred = Decimal::from(100);
    let amount = applied
        .iter()
        .fold(Decimal::ZERO, |acc, d| {
            acc + subtotal.amount * d.percentage / hundred
        });
    Price::new(amount, subtotal.currency_code)
}

// =============================================================================
// Order assembly
// =============================================================================

/// Checkout orchestrator service.
#[derive(Clone)]
pub struct CheckoutService {
    pool: PgPool,
    shop: ShopConfig,
}

impl CheckoutService {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: PgPool, shop: ShopConfig) -> Self {
        Self { pool, shop }
    }

    /// Assemble and persist an order from the current cart, then produce the
    /// payment instructions for the selected channel.
    ///
    /// The write is idempotent on `idempotency_key` and retried up to
    /// [`ORDER_WRITE_ATTEMPTS`] times with exponential backoff. The caller
    /// must keep the cart when this returns an error.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when there is nothing to order, or
    /// `CheckoutError::Persistence` when the write failed after all retries.
    #[instrument(skip(self, cart, customer, applied))]
    pub async fn place_order(
        &self,
        cart: &Cart,
        customer: CustomerDetails,
        applied: &[AppliedDiscount],
        payment_method: PaymentMethod,
        idempotency_key: Uuid,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let subtotal = cart.total();
        let discount = discount_total(subtotal, applied);
        // Stacked codes can exceed 100%; the customer never pays negative.
        let total = Price::new(
            (subtotal.amount - discount.amount).max(Decimal::ZERO),
            subtotal.currency_code,
        );

        let new_order = NewOrder {
            customer,
            items: cart.snapshot(),
            subtotal,
            discount_total: discount,
            total,
            discount_codes: applied.to_vec(),
            payment_method,
            idempotency_key,
        };

        let mut order = self.create_with_retry(&new_order).await?;
        tracing::info!(order_id = %order.id, %payment_method, total = %order.total, "Order created");

        let payment = self.dispatch_payment(&mut order).await?;
        Ok(CheckoutOutcome { order, payment })
    }

    /// Record a customer's Bizum confirmation: store the sender phone and
    /// move the order to `processing` for manual verification by the seller.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::OrderNotFound` for unknown orders,
    /// `CheckoutError::Persistence` on write failure.
    #[instrument(skip(self))]
    pub async fn confirm_bizum(
        &self,
        order_id: OrderId,
        sender_phone: &str,
    ) -> Result<Order, CheckoutError> {
        let repo = OrderRepository::new(&self.pool);
        repo.record_payment_reference(order_id, sender_phone, OrderStatus::Processing)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CheckoutError::OrderNotFound,
                other => CheckoutError::Persistence(other),
            })?;

        repo.get(order_id)
            .await
            .map_err(CheckoutError::Persistence)?
            .ok_or(CheckoutError::OrderNotFound)
    }

    async fn create_with_retry(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        let repo = OrderRepository::new(&self.pool);
        let mut attempt = 0;
        loop {
            match repo.create(new_order).await {
                Ok(order) => return Ok(order),
                Err(e) if attempt + 1 < ORDER_WRITE_ATTEMPTS => {
                    let delay = RETRY_BASE_DELAY * 2u32.pow(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        delay = ?delay,
                        "Order write failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Order write failed after all retries");
                    return Err(e);
                }
            }
        }
    }

    async fn dispatch_payment(
        &self,
        order: &mut Order,
    ) -> Result<PaymentInstructions, CheckoutError> {
        match order.payment_method {
            PaymentMethod::Whatsapp => Ok(PaymentInstructions::Whatsapp {
                link: notify::whatsapp_order_link(&self.shop.whatsapp_number, order),
            }),
            PaymentMethod::Bizum => Ok(PaymentInstructions::Bizum {
                phone: self.shop.bizum_phone.clone(),
                amount: order.total.to_string(),
                concept: notify::bizum_concept(order),
            }),
            PaymentMethod::Stripe => {
                // Stub flow: record a reference, no capture. Derived from the
                // idempotency key so a resubmitted checkout records the same one.
                let reference = format!("pi_stub_{}", order.idempotency_key.simple());
                OrderRepository::new(&self.pool)
                    .record_payment_reference(order.id, &reference, OrderStatus::Processing)
                    .await?;
                order.payment_reference = Some(reference.clone());
                order.status = OrderStatus::Processing;

                Ok(PaymentInstructions::Stripe {
                    intent_reference: reference,
                    publishable_key: self.shop.stripe_publishable_key.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use golazo_core::Price;
    use rust_decimal_macros::dec;

    use super::*;

    fn applied(code: &str, pct: Decimal) -> AppliedDiscount {
        AppliedDiscount {
            code: code.to_string(),
            percentage: pct,
        }
    }

    #[test]
    fn test_stacking_and_removal_at_fifteen_percent() {
        let subtotal = Price::eur(dec!(100));
        let mut codes = Vec::new();

        assert!(apply_code(&mut codes, "VERANO15", dec!(15)));
        assert_eq!(discount_total(subtotal, &codes).amount, dec!(15));

        assert!(apply_code(&mut codes, "SOCIO15", dec!(15)));
        assert_eq!(discount_total(subtotal, &codes).amount, dec!(30));

        assert!(remove_code(&mut codes, "VERANO15"));
        assert_eq!(discount_total(subtotal, &codes).amount, dec!(15));
    }

    #[test]
    fn test_removal_is_exact_with_mixed_percentages() {
        // Each code keeps its own percentage; removal must not assume a
        // uniform rate across the stack.
        let subtotal = Price::eur(dec!(100));
        let mut codes = vec![applied("PROMO15", dec!(15)), applied("EQUIPO10", dec!(10))];
        assert_eq!(discount_total(subtotal, &codes).amount, dec!(25));

        assert!(remove_code(&mut codes, "PROMO15"));
        assert_eq!(discount_total(subtotal, &codes).amount, dec!(10));
    }

    #[test]
    fn test_same_code_cannot_stack_twice() {
        let mut codes = Vec::new();
        assert!(apply_code(&mut codes, "PROMO15", dec!(15)));
        assert!(!apply_code(&mut codes, "PROMO15", dec!(15)));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_removing_unapplied_code_reports_false() {
        let mut codes = vec![applied("PROMO15", dec!(15))];
        assert!(!remove_code(&mut codes, "NOPE"));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_discount_total_empty_stack_is_zero() {
        let subtotal = Price::eur(dec!(80));
        assert_eq!(discount_total(subtotal, &[]).amount, dec!(0));
    }

    #[test]
    fn test_fractional_percentages_keep_decimal_precision() {
        let subtotal = Price::eur(dec!(59.90));
        let codes = vec![applied("PROMO15", dec!(15))];
        assert_eq!(discount_total(subtotal, &codes).amount, dec!(8.985));
    }
}
