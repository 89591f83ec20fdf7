//! Order models: checkout submissions and their lifecycle data.

use chrono::{DateTime, Utc};
use golazo_core::{Email, OrderId, OrderStatus, PaymentMethod, Price};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::CartItem;
use super::discount::AppliedDiscount;

/// Shipping and contact details entered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Full name.
    pub name: String,
    /// Contact email, validated at the checkout boundary.
    pub email: Email,
    /// Contact phone, also used for Bizum correlation.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Favorite league preference from the checkout form. Presentation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_league: Option<String>,
}

/// A persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Database identifier.
    pub id: OrderId,
    /// Customer contact and shipping details.
    pub customer: CustomerDetails,
    /// Snapshot of the cart items at submission time.
    pub items: Vec<CartItem>,
    /// Sum of line totals before discounts.
    pub subtotal: Price,
    /// Total discount granted by the applied codes.
    pub discount_total: Price,
    /// Post-discount total the customer pays.
    pub total: Price,
    /// Codes applied at checkout, with their percentages.
    pub discount_codes: Vec<AppliedDiscount>,
    /// Lifecycle status, `pending` on creation.
    pub status: OrderStatus,
    /// Payment-notification channel selected by the customer.
    pub payment_method: PaymentMethod,
    /// Bizum sender phone or stub card intent id, once recorded.
    pub payment_reference: Option<String>,
    /// Client-generated key that de-duplicates double submissions.
    pub idempotency_key: Uuid,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Last status or payment-reference write.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Customer contact and shipping details.
    pub customer: CustomerDetails,
    /// Snapshot of the cart items.
    pub items: Vec<CartItem>,
    /// Pre-discount subtotal.
    pub subtotal: Price,
    /// Discount granted.
    pub discount_total: Price,
    /// Post-discount total.
    pub total: Price,
    /// Applied codes with percentages.
    pub discount_codes: Vec<AppliedDiscount>,
    /// Selected payment channel.
    pub payment_method: PaymentMethod,
    /// Client idempotency key.
    pub idempotency_key: Uuid,
}
