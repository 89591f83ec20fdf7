//! Cart route handlers.
//!
//! The cart is stored in the session under a named key as an opaque JSON
//! blob and round-trips exactly between requests. Every mutation loads the
//! blob, applies one cart operation, and writes the blob back; the response
//! is the updated cart so the client can re-render without a second fetch.

use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::cart::{Cart, CartItem, Customization};
use crate::models::session::keys;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart blob from the session, or an empty cart.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Write the cart blob back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Add-to-cart payload. One unit is added per call; quantity is adjusted
/// through `/cart/update`.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: String,
    pub name: String,
    pub price: golazo_core::Price,
    #[serde(default)]
    pub is_pack: bool,
    #[serde(default)]
    pub jersey_count: Option<u32>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub customization: Option<Customization>,
}

/// Quantity update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub id: String,
    pub quantity: u32,
}

/// Line removal payload.
#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub id: String,
}

/// Note update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub id: String,
    pub notes: Option<String>,
}

/// Size/variant details update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateSpecificationsRequest {
    pub id: String,
    pub specifications: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Cart>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart))
}

/// Add one unit of an item to the cart.
#[instrument(skip(session, payload))]
pub async fn add(session: Session, Json(payload): Json<AddToCartRequest>) -> Result<Json<Cart>> {
    if payload.id.trim().is_empty() {
        return Err(AppError::BadRequest("item id cannot be empty".to_string()));
    }

    let mut cart = load_cart(&session).await?;
    cart.add_item(CartItem {
        id: payload.id,
        name: payload.name,
        price: payload.price,
        quantity: 1,
        is_pack: payload.is_pack,
        jersey_count: payload.jersey_count,
        specifications: payload.specifications,
        notes: payload.notes,
        customization: payload.customization,
    });
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Set a line's quantity.
///
/// The shop UI offers 1-5; the API rejects zero and accepts anything else.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<Cart>> {
    if payload.quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1, remove the item instead".to_string(),
        ));
    }

    let mut cart = load_cart(&session).await?;
    if !cart.update_quantity(&payload.id, payload.quantity) {
        return Err(AppError::NotFound(payload.id));
    }
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Remove a line. Unknown ids are a no-op, matching the UI's idempotent
/// delete button.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(payload): Json<RemoveItemRequest>) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(&payload.id);
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Update the note on a line.
#[instrument(skip(session, payload))]
pub async fn notes(session: Session, Json(payload): Json<UpdateNotesRequest>) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await?;
    if !cart.update_notes(&payload.id, payload.notes) {
        return Err(AppError::NotFound(payload.id));
    }
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Update the size/variant details on a line.
#[instrument(skip(session, payload))]
pub async fn specifications(
    session: Session,
    Json(payload): Json<UpdateSpecificationsRequest>,
) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await?;
    if !cart.update_specifications(&payload.id, payload.specifications) {
        return Err(AppError::NotFound(payload.id));
    }
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}

/// Unit count for the cart badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<Value>> {
    let cart = load_cart(&session).await?;
    Ok(Json(json!({ "count": cart.unit_count() })))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(cart))
}
