//! Favorites route handlers.
//!
//! A session-held set of jersey ids, stored under its own session key and
//! round-tripping like the cart blob. Toggle semantics match the storefront
//! heart button: present removes, absent adds.

use axum::Json;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session::keys;

/// Toggle payload.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub id: String,
}

async fn load_favorites(session: &Session) -> Result<Vec<String>> {
    Ok(session
        .get::<Vec<String>>(keys::FAVORITES)
        .await?
        .unwrap_or_default())
}

/// Current favorites.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Vec<String>>> {
    let favorites = load_favorites(&session).await?;
    Ok(Json(favorites))
}

/// Toggle a jersey in the favorites set.
#[instrument(skip(session))]
pub async fn toggle(
    session: Session,
    Json(payload): Json<ToggleFavoriteRequest>,
) -> Result<Json<Vec<String>>> {
    if payload.id.trim().is_empty() {
        return Err(AppError::BadRequest("item id cannot be empty".to_string()));
    }

    let mut favorites = load_favorites(&session).await?;
    if let Some(pos) = favorites.iter().position(|id| *id == payload.id) {
        favorites.remove(pos);
    } else {
        favorites.push(payload.id);
    }
    session.insert(keys::FAVORITES, &favorites).await?;

    Ok(Json(favorites))
}
