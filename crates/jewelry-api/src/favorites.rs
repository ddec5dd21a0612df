//! Handlers for `/favorites` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/favorites` | `{items, count}` |
//! | `POST`   | `/favorites` | Body: [`NewFavorite`]; duplicate is a no-op with a message; 400 if the product is unknown |
//! | `DELETE` | `/favorites` | Remove every favorite |
//! | `GET`    | `/favorites/check` | Query: selection fields; `{isFavorited}` |
//! | `DELETE` | `/favorites/{id}` | 404 if not found |
//! | `POST`   | `/favorites/{id}/reprice` | Recompute the price from current rules |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use jewelry_core::{
  favorite::{FavoriteItem, FavoriteStore, NewFavorite},
  order::Notifier,
  pricing::calculate_price,
  selection::Customization,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub const DUPLICATE_MESSAGE: &str = "This design is already in your favorites";

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
  pub items:   Vec<FavoriteItem>,
  pub count:   usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
  pub is_favorited: bool,
}

async fn snapshot<F: FavoriteStore>(
  store: &F,
  message: Option<String>,
) -> Result<FavoritesResponse, ApiError> {
  let items = store.list().await.map_err(ApiError::store)?;
  Ok(FavoritesResponse { count: items.len(), items, message })
}

fn not_found() -> ApiError { ApiError::NotFound("Favorite not found".to_string()) }

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /favorites`
pub async fn list<F, N>(
  State(state): State<AppState<F, N>>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  Ok(Json(snapshot(&*state.favorites, None).await?))
}

/// `POST /favorites`
///
/// 400 if the product is unknown. Only the size that applies to the product's
/// category is stored, and a missing product name is filled in from the
/// catalog.
pub async fn add<F, N>(
  State(state): State<AppState<F, N>>,
  Json(mut input): Json<NewFavorite>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let product = state
    .catalog
    .get(input.selection.product_id)
    .ok_or_else(|| ApiError::BadRequest("Invalid product ID".to_string()))?;

  input.selection = input.selection.normalized().for_category(product.category);
  if input.product_name.is_empty() {
    input.product_name = product.name.clone();
  }

  let message = match state.favorites.add(input).await.map_err(ApiError::store)? {
    Some(item) => {
      tracing::debug!(id = %item.id, "favorite added");
      None
    }
    None => Some(DUPLICATE_MESSAGE.to_string()),
  };

  Ok(Json(snapshot(&*state.favorites, message).await?))
}

/// `DELETE /favorites/{id}`
pub async fn remove<F, N>(
  State(state): State<AppState<F, N>>,
  Path(id): Path<String>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let uuid = Uuid::parse_str(&id).map_err(|_| not_found())?;
  if !state.favorites.remove(uuid).await.map_err(ApiError::store)? {
    return Err(not_found());
  }
  Ok(Json(snapshot(&*state.favorites, None).await?))
}

/// `DELETE /favorites`
pub async fn clear<F, N>(
  State(state): State<AppState<F, N>>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let removed = state.favorites.clear().await.map_err(ApiError::store)?;
  tracing::debug!(removed, "favorites cleared");
  Ok(Json(snapshot(&*state.favorites, None).await?))
}

/// `GET /favorites/check`
///
/// An unknown product is never favorited.
pub async fn check<F, N>(
  State(state): State<AppState<F, N>>,
  Query(selection): Query<Customization>,
) -> Result<Json<CheckResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let Some(product) = state.catalog.get(selection.product_id) else {
    return Ok(Json(CheckResponse { is_favorited: false }));
  };
  let selection = selection.normalized().for_category(product.category);
  let is_favorited = state
    .favorites
    .is_favorited(&selection)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CheckResponse { is_favorited }))
}

/// `POST /favorites/{id}/reprice`
pub async fn reprice<F, N>(
  State(state): State<AppState<F, N>>,
  Path(id): Path<String>,
) -> Result<Json<FavoritesResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let uuid = Uuid::parse_str(&id).map_err(|_| not_found())?;
  let current = state
    .favorites
    .get(uuid)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;

  let product = state
    .catalog
    .get(current.selection.product_id)
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
  let price = calculate_price(product.base_price, &current.selection);

  state
    .favorites
    .update_price(uuid, price)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;

  Ok(Json(snapshot(&*state.favorites, None).await?))
}
