//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Catalog (read-only)
//! GET  /products/jerseys       - Jersey listing (?league= filter)
//! GET  /products/jerseys/{id}  - Jersey detail
//! GET  /products/packs         - Pack listing
//! GET  /products/packs/{id}    - Pack detail
//!
//! # Cart (session-held)
//! GET  /cart                   - Current cart
//! POST /cart/add               - Add one unit of an item
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/notes             - Update a line's note
//! POST /cart/specifications    - Update a line's size/variant details
//! GET  /cart/count             - Unit count (badge)
//! POST /cart/clear             - Empty the cart
//!
//! # Favorites (session-held)
//! GET  /favorites              - Favorite jersey ids
//! POST /favorites/toggle       - Toggle an id in the set
//!
//! # Checkout
//! GET  /checkout/discounts         - Applied codes and running discount
//! POST /checkout/discounts/apply   - Check and apply a code
//! POST /checkout/discounts/remove  - Remove an applied code
//! POST /checkout/submit            - Create the order, get payment instructions
//! POST /checkout/bizum/confirm     - Record a customer's Bizum confirmation
//! ```

pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/jerseys", get(products::list_jerseys))
        .route("/jerseys/{id}", get(products::show_jersey))
        .route("/packs", get(products::list_packs))
        .route("/packs/{id}", get(products::show_pack))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/notes", post(cart::notes))
        .route("/specifications", post(cart::specifications))
        .route("/count", get(cart::count))
        .route("/clear", post(cart::clear))
}

/// Create the favorites routes router.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::show))
        .route("/toggle", post(favorites::toggle))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/discounts", get(checkout::applied_discounts))
        .route("/discounts/apply", post(checkout::apply_discount))
        .route("/discounts/remove", post(checkout::remove_discount))
        .route("/submit", post(checkout::submit))
        .route("/bizum/confirm", post(checkout::confirm_bizum))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/favorites", favorites_routes())
        .nest("/checkout", checkout_routes())
}
