//! Catalog repository (read-only).
//!
//! The storefront only reads jerseys and packs; rows are seeded via the CLI.

use chrono::{DateTime, Utc};
use golazo_core::{CurrencyCode, JerseyId, PackId, Price};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{Jersey, Pack};

/// Row shape for `storefront.jerseys`.
#[derive(sqlx::FromRow)]
struct JerseyRow {
    id: i64,
    name: String,
    team: String,
    league: String,
    price: Decimal,
    sizes: Vec<String>,
    image_url: Option<String>,
    is_retro: bool,
    created_at: DateTime<Utc>,
}

impl From<JerseyRow> for Jersey {
    fn from(r: JerseyRow) -> Self {
        Self {
            id: JerseyId::new(r.id),
            name: r.name,
            team: r.team,
            league: r.league,
            price: Price::new(r.price, CurrencyCode::EUR),
            sizes: r.sizes,
            image_url: r.image_url,
            is_retro: r.is_retro,
            created_at: r.created_at,
        }
    }
}

/// Row shape for `storefront.packs`.
#[derive(sqlx::FromRow)]
struct PackRow {
    id: i64,
    name: String,
    description: Option<String>,
    jersey_count: i32,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<PackRow> for Pack {
    type Error = RepositoryError;

    fn try_from(r: PackRow) -> Result<Self, Self::Error> {
        let jersey_count = u32::try_from(r.jersey_count).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "pack {}: negative jersey_count {}",
                r.id, r.jersey_count
            ))
        })?;

        Ok(Self {
            id: PackId::new(r.id),
            name: r.name,
            description: r.description,
            jersey_count,
            price: Price::new(r.price, CurrencyCode::EUR),
            created_at: r.created_at,
        })
    }
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List jerseys, optionally filtered by league, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_jerseys(&self, league: Option<&str>) -> Result<Vec<Jersey>, RepositoryError> {
        let rows = match league {
            Some(league) => {
                sqlx::query_as::<_, JerseyRow>(
                    r"
                    SELECT id, name, team, league, price, sizes, image_url, is_retro, created_at
                    FROM storefront.jerseys
                    WHERE league = $1
                    ORDER BY name
                    ",
                )
                .bind(league)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, JerseyRow>(
                    r"
                    SELECT id, name, team, league, price, sizes, image_url, is_retro, created_at
                    FROM storefront.jerseys
                    ORDER BY name
                    ",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Jersey::from).collect())
    }

    /// Fetch a single jersey.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_jersey(&self, id: JerseyId) -> Result<Option<Jersey>, RepositoryError> {
        let row = sqlx::query_as::<_, JerseyRow>(
            r"
            SELECT id, name, team, league, price, sizes, image_url, is_retro, created_at
            FROM storefront.jerseys
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Jersey::from))
    }

    /// List packs, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_packs(&self) -> Result<Vec<Pack>, RepositoryError> {
        let rows = sqlx::query_as::<_, PackRow>(
            r"
            SELECT id, name, description, jersey_count, price, created_at
            FROM storefront.packs
            ORDER BY price
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Pack::try_from).collect()
    }

    /// Fetch a single pack.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_pack(&self, id: PackId) -> Result<Option<Pack>, RepositoryError> {
        let row = sqlx::query_as::<_, PackRow>(
            r"
            SELECT id, name, description, jersey_count, price, created_at
            FROM storefront.packs
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Pack::try_from).transpose()
    }
}
