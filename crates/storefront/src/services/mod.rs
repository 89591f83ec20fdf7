//! Business services for the storefront.
//!
//! - [`discounts`] - Discount code registry: validation, redemption, seeding
//! - [`checkout`] - Order assembly, discount stacking, payment dispatch
//! - [`notify`] - Payment-notification payloads (WhatsApp, mailto, Bizum)

pub mod checkout;
pub mod discounts;
pub mod notify;
