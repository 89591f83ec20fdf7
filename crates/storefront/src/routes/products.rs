//! Catalog route handlers (read-only).
//!
//! Listings and details are served through a short-TTL in-process cache;
//! the catalog changes through out-of-band seeding, never through these
//! handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use golazo_core::{JerseyId, PackId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::{Jersey, Pack};
use crate::state::{AppState, CatalogCacheKey, CatalogCacheValue};

/// Jersey listing filters.
#[derive(Debug, Deserialize)]
pub struct JerseyListQuery {
    /// Restrict to one league, e.g. `La Liga`.
    pub league: Option<String>,
}

/// Jersey listing, optionally filtered by league.
#[instrument(skip(state))]
pub async fn list_jerseys(
    State(state): State<AppState>,
    Query(query): Query<JerseyListQuery>,
) -> Result<Json<Vec<Jersey>>> {
    let key = CatalogCacheKey::Jerseys {
        league: query.league.clone(),
    };
    if let Some(CatalogCacheValue::Jerseys(jerseys)) = state.catalog_cache().get(&key).await {
        return Ok(Json(jerseys));
    }

    let jerseys = CatalogRepository::new(state.pool())
        .list_jerseys(query.league.as_deref())
        .await?;
    state
        .catalog_cache()
        .insert(key, CatalogCacheValue::Jerseys(jerseys.clone()))
        .await;

    Ok(Json(jerseys))
}

/// Jersey detail.
#[instrument(skip(state))]
pub async fn show_jersey(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Jersey>> {
    let key = CatalogCacheKey::Jersey(id);
    if let Some(CatalogCacheValue::Jersey(jersey)) = state.catalog_cache().get(&key).await {
        return Ok(Json(*jersey));
    }

    let jersey = CatalogRepository::new(state.pool())
        .get_jersey(JerseyId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("jersey {id}")))?;
    state
        .catalog_cache()
        .insert(key, CatalogCacheValue::Jersey(Box::new(jersey.clone())))
        .await;

    Ok(Json(jersey))
}

/// Pack listing.
#[instrument(skip(state))]
pub async fn list_packs(State(state): State<AppState>) -> Result<Json<Vec<Pack>>> {
    let key = CatalogCacheKey::Packs;
    if let Some(CatalogCacheValue::Packs(packs)) = state.catalog_cache().get(&key).await {
        return Ok(Json(packs));
    }

    let packs = CatalogRepository::new(state.pool()).list_packs().await?;
    state
        .catalog_cache()
        .insert(key, CatalogCacheValue::Packs(packs.clone()))
        .await;

    Ok(Json(packs))
}

/// Pack detail.
#[instrument(skip(state))]
pub async fn show_pack(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Pack>> {
    let key = CatalogCacheKey::Pack(id);
    if let Some(CatalogCacheValue::Pack(pack)) = state.catalog_cache().get(&key).await {
        return Ok(Json(*pack));
    }

    let pack = CatalogRepository::new(state.pool())
        .get_pack(PackId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("pack {id}")))?;
    state
        .catalog_cache()
        .insert(key, CatalogCacheValue::Pack(Box::new(pack.clone())))
        .await;

    Ok(Json(pack))
}
