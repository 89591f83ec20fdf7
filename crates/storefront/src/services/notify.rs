//! Payment-notification payload builders.
//!
//! None of these channels are API calls: WhatsApp and mailto are pre-filled
//! links the customer opens in their own app, and Bizum is a set of manual
//! transfer instructions. There is no delivery confirmation on any of them.

use golazo_core::PaymentMethod;
use serde::Serialize;

use crate::models::Order;

/// Instructions returned to the client after a successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum PaymentInstructions {
    /// Open a pre-filled WhatsApp message to the shop.
    Whatsapp {
        /// `https://wa.me/...` link with the order summary as message text.
        link: String,
    },
    /// Send a manual Bizum transfer and confirm it in the shop.
    Bizum {
        /// Phone number to send the transfer to.
        phone: String,
        /// Amount to transfer, formatted for display.
        amount: String,
        /// Transfer concept so the seller can match it to the order.
        concept: String,
    },
    /// Stubbed card flow - no real capture happens.
    Stripe {
        /// Reference recorded on the order in place of a real intent.
        intent_reference: String,
        /// Publishable key for the client-side stub, when configured.
        #[serde(skip_serializing_if = "Option::is_none")]
        publishable_key: Option<String>,
    },
}

/// Compose the WhatsApp order message and wrap it in a `wa.me` link.
///
/// `shop_number` is digits-only international format (validated at config
/// load). The message text is URL-encoded into the `text` query parameter.
#[must_use]
pub fn whatsapp_order_link(shop_number: &str, order: &Order) -> String {
    let text = order_message_text(order);
    format!(
        "https://wa.me/{shop_number}?text={}",
        urlencoding::encode(&text)
    )
}

/// Compose a mailto link carrying the same order summary.
#[must_use]
pub fn order_mailto_link(contact_email: &str, order: &Order) -> String {
    let subject = format!("Pedido #{}", order.id);
    let body = order_message_text(order);
    format!(
        "mailto:{contact_email}?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

/// Bizum transfer concept for an order.
#[must_use]
pub fn bizum_concept(order: &Order) -> String {
    format!("Pedido #{}", order.id)
}

/// Human-readable order summary used as the message body on every channel.
fn order_message_text(order: &Order) -> String {
    let mut text = format!("¡Hola! Quiero confirmar mi pedido #{}:\n\n", order.id);

    for item in &order.items {
        text.push_str(&format!(
            "- {}x {} ({})\n",
            item.quantity,
            item.name,
            item.unit_price()
        ));
        if let Some(c) = &item.customization {
            text.push_str(&format!("    Personalización: {} {}\n", c.name, c.number));
        }
        if let Some(s) = &item.specifications {
            text.push_str(&format!("    Detalles: {s}\n"));
        }
    }

    text.push_str(&format!("\nSubtotal: {}\n", order.subtotal));
    if !order.discount_codes.is_empty() {
        let codes: Vec<&str> = order
            .discount_codes
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        text.push_str(&format!(
            "Descuento ({}): -{}\n",
            codes.join(", "),
            order.discount_total
        ));
    }
    text.push_str(&format!("Total: {}\n", order.total));

    text.push_str(&format!(
        "\nNombre: {}\nDirección: {}, {}, CP {}\nTeléfono: {}\n",
        order.customer.name,
        order.customer.address,
        order.customer.city,
        order.customer.postal_code,
        order.customer.phone
    ));

    if order.payment_method == PaymentMethod::Whatsapp {
        text.push_str("\nPago: a convenir por WhatsApp\n");
    }

    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use golazo_core::{Email, OrderId, OrderStatus, Price};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::models::cart::CartItem;
    use crate::models::discount::AppliedDiscount;
    use crate::models::order::CustomerDetails;

    fn sample_order() -> Order {
        Order {
            id: OrderId::new(42),
            customer: CustomerDetails {
                name: "Ana García".to_string(),
                email: Email::parse("ana@example.com").unwrap(),
                phone: "600111222".to_string(),
                address: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                postal_code: "28001".to_string(),
                favorite_league: None,
            },
            items: vec![CartItem {
                id: "j-1-M".to_string(),
                name: "Real Madrid Home 23/24 (M)".to_string(),
                price: Price::eur(dec!(19.95)),
                quantity: 2,
                is_pack: false,
                jersey_count: None,
                specifications: None,
                notes: None,
                customization: None,
            }],
            subtotal: Price::eur(dec!(39.90)),
            discount_total: Price::eur(dec!(5.99)),
            total: Price::eur(dec!(33.91)),
            discount_codes: vec![AppliedDiscount {
                code: "PROMO15".to_string(),
                percentage: dec!(15),
            }],
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::Whatsapp,
            payment_reference: None,
            idempotency_key: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_whatsapp_link_is_encoded() {
        let link = whatsapp_order_link("34600111222", &sample_order());

        assert!(link.starts_with("https://wa.me/34600111222?text="));
        // Raw spaces and newlines must not survive encoding
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        // Order number and code survive as encoded text
        assert!(link.contains("%2342"));
        assert!(link.contains("PROMO15"));
    }

    #[test]
    fn test_message_text_lists_lines_and_totals() {
        let text = super::order_message_text(&sample_order());

        assert!(text.contains("pedido #42"));
        assert!(text.contains("2x Real Madrid Home 23/24 (M) (19.95 €)"));
        assert!(text.contains("Subtotal: 39.90 €"));
        assert!(text.contains("Descuento (PROMO15): -5.99 €"));
        assert!(text.contains("Total: 33.91 €"));
        assert!(text.contains("Calle Mayor 1"));
    }

    #[test]
    fn test_mailto_link_has_subject_and_body() {
        let link = order_mailto_link("pedidos@golazo.shop", &sample_order());

        assert!(link.starts_with("mailto:pedidos@golazo.shop?subject="));
        assert!(link.contains("&body="));
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_bizum_concept_names_the_order() {
        assert_eq!(bizum_concept(&sample_order()), "Pedido #42");
    }
}
