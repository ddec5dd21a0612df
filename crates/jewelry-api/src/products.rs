//! Handlers for the catalog and price quotes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/products` | Full catalog |
//! | `GET`  | `/options` | Offered metals, stones, carats and sizes with surcharges |
//! | `POST` | `/customize` | Body: [`Customization`]; 404 if the product is unknown |

use axum::{Json, extract::State};
use jewelry_core::{
  catalog::Product,
  favorite::FavoriteStore,
  order::Notifier,
  pricing::{OptionSheet, calculate_price},
  selection::Customization,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{AppState, error::ApiError};

// ─── Catalog ──────────────────────────────────────────────────────────────────

/// `GET /products`
pub async fn list<F, N>(State(state): State<AppState<F, N>>) -> Json<Vec<Product>>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  Json(state.catalog.products().to_vec())
}

/// `GET /options`
pub async fn options() -> Json<OptionSheet> { Json(OptionSheet::current()) }

// ─── Quote ────────────────────────────────────────────────────────────────────

/// The selection echoed back with a quote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOptions {
  pub metal:         String,
  pub stone:         String,
  pub carat_size:    String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ring_size:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub necklace_size: Option<String>,
}

impl From<Customization> for SelectedOptions {
  fn from(s: Customization) -> Self {
    SelectedOptions {
      metal:         s.metal,
      stone:         s.stone,
      carat_size:    s.carat_size,
      ring_size:     s.ring_size,
      necklace_size: s.necklace_size,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeResponse {
  /// Product name.
  pub product:        String,
  #[serde(with = "rust_decimal::serde::float")]
  pub final_price:    Decimal,
  pub customizations: SelectedOptions,
}

/// `POST /customize`: quote a selection without touching the cart.
///
/// Only the size that applies to the product's category is echoed.
pub async fn customize<F, N>(
  State(state): State<AppState<F, N>>,
  Json(selection): Json<Customization>,
) -> Result<Json<CustomizeResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let product = state
    .catalog
    .get(selection.product_id)
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

  let selection = selection.normalized().for_category(product.category);
  let final_price = calculate_price(product.base_price, &selection);

  Ok(Json(CustomizeResponse {
    product: product.name.clone(),
    final_price,
    customizations: selection.into(),
  }))
}
