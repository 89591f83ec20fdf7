//! Domain models for the storefront.
//!
//! - [`cart`] - Session-held shopping cart and its pricing rules
//! - [`catalog`] - Read-only jersey and pack catalog entries
//! - [`discount`] - Discount codes and check/redemption results
//! - [`order`] - Persisted checkout submissions
//! - [`session`] - Session key names and session-stored state

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod order;
pub mod session;

pub use cart::{Cart, CartItem, Customization};
pub use catalog::{Jersey, Pack};
pub use discount::{AppliedDiscount, Discount, DiscountStatus};
pub use order::{CustomerDetails, NewOrder, Order};
