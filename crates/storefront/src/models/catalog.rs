//! Catalog models: jerseys and multi-jersey packs.
//!
//! The storefront consumes the catalog read-only; rows are seeded and edited
//! out-of-band (CLI seeding, back-office tooling).

use chrono::{DateTime, Utc};
use golazo_core::{JerseyId, PackId, Price};
use serde::{Deserialize, Serialize};

/// A jersey catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jersey {
    /// Database identifier.
    pub id: JerseyId,
    /// Display name, e.g. "Real Madrid Home 23/24".
    pub name: String,
    /// Club or national team.
    pub team: String,
    /// League the team plays in, used by the browse filters.
    pub league: String,
    /// Unit price.
    pub price: Price,
    /// Available sizes, e.g. `["S", "M", "L", "XL"]`.
    pub sizes: Vec<String>,
    /// Primary product image.
    pub image_url: Option<String>,
    /// True for retro/classic editions.
    pub is_retro: bool,
    /// When the entry was added.
    pub created_at: DateTime<Utc>,
}

/// A multi-jersey pack offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    /// Database identifier.
    pub id: PackId,
    /// Display name, e.g. "Pack Liga x3".
    pub name: String,
    /// Marketing description.
    pub description: Option<String>,
    /// Number of jerseys included.
    pub jersey_count: u32,
    /// Pack price (below the per-unit sum).
    pub price: Price,
    /// When the entry was added.
    pub created_at: DateTime<Utc>,
}
