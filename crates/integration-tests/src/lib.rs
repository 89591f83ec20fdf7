//! Integration tests for Golazo.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations + seeds
//! cargo run -p golazo-cli -- migrate
//! cargo run -p golazo-cli -- seed all
//!
//! # Start the storefront
//! cargo run -p golazo-storefront
//!
//! # Run integration tests
//! cargo test -p golazo-integration-tests
//! ```
//!
//! Tests are skipped (pass without assertions) when no storefront is
//! reachable, so `cargo test` stays green on machines without the stack.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart state and pricing over the HTTP API
//! - `storefront_discounts` - Discount code application and stacking
//! - `storefront_checkout` - Order submission and payment channels

use std::time::Duration;

use reqwest::Client;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build a client with a cookie store, so the session (cart, applied codes)
/// persists across requests like a browser's would.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Probe the storefront; returns a session client when it is reachable,
/// `None` (test should skip) otherwise.
pub async fn storefront_or_skip(test_name: &str) -> Option<Client> {
    let client = session_client();
    let health_url = format!("{}/health", storefront_base_url());

    match client.get(&health_url).send().await {
        Ok(resp) if resp.status().is_success() => Some(client),
        _ => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("skipping {test_name}: no storefront at {health_url}");
            }
            None
        }
    }
}
