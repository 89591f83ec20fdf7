//! Session-stored state.
//!
//! The customer's client-side state (cart contents, applied discount codes)
//! lives in the server session as opaque JSON blobs under the keys below and
//! must round-trip exactly between requests.

/// Session keys for customer state.
pub mod keys {
    /// Key for the cart blob (`{items, total}`).
    pub const CART: &str = "cart";

    /// Key for the list of discount codes applied to the current checkout,
    /// each stored with the percentage it granted.
    pub const APPLIED_DISCOUNTS: &str = "applied_discounts";

    /// Key for the favorites blob (jersey ids).
    pub const FAVORITES: &str = "favorites";
}
