//! Handlers for `/cart` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/cart` | `{items, total, itemCount}` |
//! | `POST`   | `/cart` | Body: [`Customization`]; 400 if the product is unknown |
//! | `DELETE` | `/cart/{index}` | Zero-based position; 404 if out of range |

use axum::{
  Json,
  extract::{Path, State},
};
use jewelry_core::{
  cart::{CartItem, CartSummary},
  favorite::FavoriteStore,
  order::Notifier,
  pricing::calculate_price,
  selection::Customization,
};

use crate::{AppState, error::ApiError};

/// `GET /cart`
pub async fn get<F, N>(State(state): State<AppState<F, N>>) -> Json<CartSummary>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  Json(state.cart.summary())
}

/// `POST /cart`: append a line.
///
/// Name and price are taken from the catalog and the pricing rules at this
/// moment; any `productName` or `price` the client sends is ignored. Only the
/// size that applies to the product's category is kept.
pub async fn add<F, N>(
  State(state): State<AppState<F, N>>,
  Json(selection): Json<Customization>,
) -> Result<Json<CartSummary>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let product = state
    .catalog
    .get(selection.product_id)
    .ok_or_else(|| ApiError::BadRequest("Invalid product ID".to_string()))?;

  let selection = selection.normalized().for_category(product.category);
  let price = calculate_price(product.base_price, &selection);

  state.cart.add(CartItem {
    selection,
    product_name: product.name.clone(),
    price,
  });

  Ok(Json(state.cart.summary()))
}

/// `DELETE /cart/{index}`
pub async fn remove<F, N>(
  State(state): State<AppState<F, N>>,
  Path(index): Path<String>,
) -> Result<Json<CartSummary>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  index
    .parse::<usize>()
    .ok()
    .and_then(|i| state.cart.remove(i))
    .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

  Ok(Json(state.cart.summary()))
}
