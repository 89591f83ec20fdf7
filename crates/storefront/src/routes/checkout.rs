//! Checkout route handlers.
//!
//! Discount codes applied here are held in the session next to the cart and
//! carry the percentage they granted, so the running discount is exact for
//! any mix of codes. Submission snapshots both, persists the order, and only
//! then clears the session state - a failed submit leaves cart and codes
//! untouched for a retry.

use axum::{Json, extract::State};
use golazo_core::{Email, OrderId, PaymentMethod};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::discount::{AppliedDiscount, DiscountStatus};
use crate::models::order::CustomerDetails;
use crate::models::session::keys;
use crate::services::checkout::{self as checkout_service};
use crate::services::notify::{self, PaymentInstructions};
use crate::state::AppState;

use super::cart::{load_cart, save_cart};

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the applied-codes list from the session.
async fn load_applied(session: &Session) -> Result<Vec<AppliedDiscount>> {
    Ok(session
        .get::<Vec<AppliedDiscount>>(keys::APPLIED_DISCOUNTS)
        .await?
        .unwrap_or_default())
}

/// Write the applied-codes list back to the session.
async fn save_applied(session: &Session, applied: &[AppliedDiscount]) -> Result<()> {
    session.insert(keys::APPLIED_DISCOUNTS, applied).await?;
    Ok(())
}

/// Redeemer identifier for redemption statistics: the session id, or a fixed
/// marker for sessions that have not been persisted yet.
fn redeemer_id(session: &Session) -> String {
    session
        .id()
        .map_or_else(|| "anonymous".to_string(), |id| id.to_string())
}

// =============================================================================
// Payloads
// =============================================================================

/// Apply/remove discount payload.
#[derive(Debug, Deserialize)]
pub struct DiscountCodeRequest {
    pub code: String,
}

/// Discount state returned by every discount endpoint.
#[derive(Debug, Serialize)]
pub struct DiscountSummary {
    pub status: Option<DiscountStatus>,
    pub applied_codes: Vec<AppliedDiscount>,
    pub subtotal: golazo_core::Price,
    pub discount_total: golazo_core::Price,
}

/// Customer form fields as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub favorite_league: Option<String>,
}

/// Checkout submission payload.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub customer: CustomerForm,
    pub payment_method: PaymentMethod,
    /// Client-generated key; resubmitting the same key returns the order
    /// created by the first submission instead of creating a second one.
    pub idempotency_key: Uuid,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub order_id: OrderId,
    pub status: golazo_core::OrderStatus,
    pub total: golazo_core::Price,
    pub payment: PaymentInstructions,
    /// Pre-filled mailto fallback, when the shop has a contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_mailto: Option<String>,
}

/// Bizum confirmation payload.
#[derive(Debug, Deserialize)]
pub struct BizumConfirmRequest {
    pub order_id: i64,
    pub sender_phone: String,
}

impl CustomerForm {
    /// Validate the form into `CustomerDetails`.
    ///
    /// Validation errors are synchronous and carry the offending field; no
    /// network call has been made at this point.
    fn into_details(self) -> Result<CustomerDetails> {
        let email = Email::parse(self.email.trim())
            .map_err(|e| AppError::BadRequest(format!("email: {e}")))?;

        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} is required")));
            }
        }

        Ok(CustomerDetails {
            name: self.name.trim().to_string(),
            email,
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            favorite_league: self.favorite_league,
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn discount_summary(
    session: &Session,
    status: Option<DiscountStatus>,
) -> Result<Json<DiscountSummary>> {
    let cart = load_cart(session).await?;
    let applied = load_applied(session).await?;
    let subtotal = cart.total();
    let discount_total = checkout_service::discount_total(subtotal, &applied);

    Ok(Json(DiscountSummary {
        status,
        applied_codes: applied,
        subtotal,
        discount_total,
    }))
}

/// Applied codes and the running discount.
#[instrument(skip(session))]
pub async fn applied_discounts(session: Session) -> Result<Json<DiscountSummary>> {
    discount_summary(&session, None).await
}

/// Check a code and apply it to the current checkout.
///
/// A valid code is appended to the session list with its percentage and a
/// redemption is recorded fire-and-forget: bookkeeping failure never blocks
/// the apply. An already-applied code is reported invalid without touching
/// the registry again.
#[instrument(skip(state, session))]
pub async fn apply_discount(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<DiscountCodeRequest>,
) -> Result<Json<DiscountSummary>> {
    let code = crate::services::discounts::normalize_code(&payload.code);
    let mut applied = load_applied(&session).await?;

    if applied.iter().any(|d| d.code == code) {
        let status = DiscountStatus::invalid("El código ya está aplicado");
        return discount_summary(&session, Some(status)).await;
    }

    let status = state.discounts().check_status(&code).await;
    if status.is_valid {
        checkout_service::apply_code(&mut applied, &code, status.percentage);
        save_applied(&session, &applied).await?;

        // Fire-and-forget redemption bookkeeping.
        let discounts = state.discounts().clone();
        let redeemer = redeemer_id(&session);
        let redeemed_code = code.clone();
        tokio::spawn(async move {
            discounts.redeem(&redeemed_code, &redeemer).await;
        });
    }

    discount_summary(&session, Some(status)).await
}

/// Remove an applied code. The remaining discount is recomputed from the
/// remaining codes' own percentages.
#[instrument(skip(session))]
pub async fn remove_discount(
    session: Session,
    Json(payload): Json<DiscountCodeRequest>,
) -> Result<Json<DiscountSummary>> {
    let code = crate::services::discounts::normalize_code(&payload.code);
    let mut applied = load_applied(&session).await?;

    if !checkout_service::remove_code(&mut applied, &code) {
        return Err(AppError::NotFound(code));
    }
    save_applied(&session, &applied).await?;

    discount_summary(&session, None).await
}

/// Create the order and return payment instructions.
///
/// On success the cart and applied codes are cleared from the session. On
/// failure both are kept so the customer can retry.
#[instrument(skip(state, session, payload))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>> {
    let customer = payload.customer.into_details()?;
    let cart = load_cart(&session).await?;
    let applied = load_applied(&session).await?;

    let outcome = state
        .checkout()
        .place_order(
            &cart,
            customer,
            &applied,
            payload.payment_method,
            payload.idempotency_key,
        )
        .await?;

    // Only a persisted order clears the session state.
    let mut cleared = cart;
    cleared.clear();
    save_cart(&session, &cleared).await?;
    save_applied(&session, &[]).await?;

    let contact_mailto = state
        .config()
        .shop
        .contact_email
        .as_deref()
        .map(|email| notify::order_mailto_link(email, &outcome.order));

    Ok(Json(SubmitResponse {
        order_id: outcome.order.id,
        status: outcome.order.status,
        total: outcome.order.total,
        payment: outcome.payment,
        contact_mailto,
    }))
}

/// Record a customer's Bizum confirmation and move the order to `processing`.
#[instrument(skip(state, payload))]
pub async fn confirm_bizum(
    State(state): State<AppState>,
    Json(payload): Json<BizumConfirmRequest>,
) -> Result<Json<Value>> {
    if payload.sender_phone.trim().is_empty() {
        return Err(AppError::BadRequest("sender_phone is required".to_string()));
    }

    let order = state
        .checkout()
        .confirm_bizum(OrderId::new(payload.order_id), payload.sender_phone.trim())
        .await?;

    Ok(Json(json!({
        "order_id": order.id,
        "status": order.status,
    })))
}
