//! Shopping cart model and pricing rules.
//!
//! The cart lives in the customer's session as an opaque JSON blob of
//! `{items, total}` and must round-trip exactly across requests. The running
//! total is never adjusted incrementally: every mutation recomputes it as a
//! full fold over the line items, so the stored total cannot drift from
//! `sum(line_total)` no matter what sequence of operations ran before.

use golazo_core::{CurrencyCode, Price};
use serde::{Deserialize, Serialize};

/// Per-unit personalization added to a jersey (printed name and number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    /// Name printed on the back.
    pub name: String,
    /// Squad number printed on the back.
    pub number: String,
    /// Per-unit surcharge for the printing.
    pub price: Price,
}

/// A line item in the cart.
///
/// `id` identifies the catalog jersey or pack variant; size and
/// personalization variants carry distinct ids (encoded as a suffix of the
/// display name by the catalog), so two sizes of the same jersey are two
/// separate lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog item or pack variant identifier.
    pub id: String,
    /// Display name shown in cart and order summaries.
    pub name: String,
    /// Unit price captured when the item was added. Quantity changes never
    /// re-fetch the catalog price.
    pub price: Price,
    /// Units of this line, 1-5 in the shop UI.
    pub quantity: u32,
    /// True for multi-jersey packs.
    #[serde(default)]
    pub is_pack: bool,
    /// Number of jerseys included when this line is a pack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_count: Option<u32>,
    /// Free-form size/variant details entered by the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    /// Customer note attached to the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Optional name-and-number printing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
}

impl CartItem {
    /// Effective unit price: base price plus the customization surcharge.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        match &self.customization {
            Some(c) => self.price.plus(&c.price),
            None => self.price,
        }
    }

    /// Line total: effective unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// The session-held cart.
///
/// Fields are private; all mutation goes through the methods below, each of
/// which re-establishes the total invariant before returning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Price,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The running total, equal to the sum of all line totals.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Sum of all line quantities (the cart badge count).
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// True when the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `item`.
    ///
    /// If a line with the same `id` already exists its quantity is
    /// incremented and the existing line's price and customization are kept;
    /// the incoming price is discarded. Otherwise the item is appended as a
    /// new line with quantity 1.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += 1;
        } else {
            self.items.push(CartItem {
                quantity: 1,
                ..item
            });
        }
        self.recalculate();
    }

    /// Remove the line with the given id. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
        self.recalculate();
    }

    /// Set the quantity of the line with the given id.
    ///
    /// The shop UI restricts the selector to 1-5; the cart itself stores
    /// whatever it is given. Returns false when no line matches.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.quantity = quantity;
        self.recalculate();
        true
    }

    /// Replace the note on a line. Metadata only, no effect on the total.
    pub fn update_notes(&mut self, id: &str, notes: Option<String>) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.notes = notes;
        true
    }

    /// Replace the size/variant details on a line. Metadata only.
    pub fn update_specifications(&mut self, id: &str, specifications: Option<String>) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.specifications = specifications;
        true
    }

    /// Empty the cart. Called after a successful order submission.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Take a snapshot of the items for an order record.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    fn recalculate(&mut self) {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::EUR, |i| i.price.currency_code);
        self.total = self
            .items
            .iter()
            .fold(Price::zero(currency), |acc, i| acc.plus(&i.line_total()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn jersey(id: &str, price: rust_decimal::Decimal) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: format!("Jersey {id}"),
            price: Price::eur(price),
            quantity: 1,
            is_pack: false,
            jersey_count: None,
            specifications: None,
            notes: None,
            customization: None,
        }
    }

    #[test]
    fn test_total_tracks_item_mutations() {
        let mut cart = Cart::new();

        cart.add_item(jersey("A", dec!(20)));
        assert_eq!(cart.total().amount, dec!(20));

        cart.add_item(jersey("A", dec!(20)));
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total().amount, dec!(40));

        assert!(cart.update_quantity("A", 4));
        assert_eq!(cart.total().amount, dec!(80));

        cart.remove_item("A");
        assert!(cart.is_empty());
        assert_eq!(cart.total().amount, dec!(0));
    }

    #[test]
    fn test_duplicate_add_keeps_existing_price() {
        // The same id added with a different price must not desynchronize the
        // total: the existing line's price wins.
        let mut cart = Cart::new();
        cart.add_item(jersey("A", dec!(20)));
        cart.add_item(jersey("A", dec!(35)));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].price.amount, dec!(20));
        assert_eq!(cart.total().amount, dec!(40));
    }

    #[test]
    fn test_customization_surcharge_in_total() {
        let mut item = jersey("A", dec!(20));
        item.customization = Some(Customization {
            name: "RAMOS".to_string(),
            number: "4".to_string(),
            price: Price::eur(dec!(5)),
        });

        let mut cart = Cart::new();
        cart.add_item(item);
        assert!(cart.update_quantity("A", 3));
        assert_eq!(cart.total().amount, dec!(75));
    }

    #[test]
    fn test_metadata_updates_leave_total_alone() {
        let mut cart = Cart::new();
        cart.add_item(jersey("A", dec!(20)));

        assert!(cart.update_notes("A", Some("gift wrap".to_string())));
        assert!(cart.update_specifications("A", Some("size M".to_string())));
        assert!(!cart.update_notes("missing", None));

        assert_eq!(cart.total().amount, dec!(20));
        assert_eq!(cart.items()[0].notes.as_deref(), Some("gift wrap"));
    }

    #[test]
    fn test_unknown_quantity_update_is_reported() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity("missing", 2));
    }

    #[test]
    fn test_json_blob_roundtrips_exactly() {
        let mut cart = Cart::new();
        let mut item = jersey("A", dec!(19.95));
        item.specifications = Some("size L".to_string());
        cart.add_item(item);
        cart.add_item(jersey("B", dec!(49.90)));

        let blob = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total().amount, dec!(69.85));
    }
}
