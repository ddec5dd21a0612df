//! Checkout and order history.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/checkout` | Body: [`CheckoutBody`]; 400 if the cart is empty |
//! | `GET`  | `/orders` | Every order, oldest first |
//! | `GET`  | `/orders/{id}` | 404 if not found |
//! | `POST` | `/test-email` | Dev only: one confirmation attempt for a sample order |

use axum::{
  Json,
  extract::{Path, State},
};
use jewelry_core::{
  cart::CartItem,
  catalog::Product,
  favorite::FavoriteStore,
  order::{Delivery, Notifier, Order},
  pricing::calculate_price,
  selection::Customization,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Checkout ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
  #[serde(default)]
  pub customer_name:  String,
  #[serde(default)]
  pub customer_email: String,
}

/// `POST /checkout`: turn the whole cart into an order.
///
/// The cart is emptied in the same step that hands its lines over, so an
/// order never shares a line with a later checkout. An empty cart is rejected
/// before anything changes.
pub async fn checkout<F, N>(
  State(state): State<AppState<F, N>>,
  Json(body): Json<CheckoutBody>,
) -> Result<Json<Order>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let items = state.cart.take_all();
  if items.is_empty() {
    return Err(ApiError::BadRequest("Cart is empty".to_string()));
  }

  let order = state
    .orders
    .create_order(body.customer_name, body.customer_email, items);
  Ok(Json(order))
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /orders`
pub async fn list<F, N>(State(state): State<AppState<F, N>>) -> Json<Vec<Order>>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  Json(state.orders.list())
}

/// `GET /orders/{id}`
pub async fn get_one<F, N>(
  State(state): State<AppState<F, N>>,
  Path(id): Path<String>,
) -> Result<Json<Order>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  Uuid::parse_str(&id)
    .ok()
    .and_then(|id| state.orders.get(id))
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("order {id} not found")))
}

// ─── Test email ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEmailResponse {
  pub email_sent: bool,
  pub order_id:   Uuid,
}

fn sample_order(product: &Product) -> Order {
  let selection = Customization {
    product_id:    product.id,
    metal:         "Gold".to_string(),
    stone:         "Diamond".to_string(),
    carat_size:    "2ct".to_string(),
    ring_size:     Some("7".to_string()),
    necklace_size: None,
  }
  .for_category(product.category);

  let item = CartItem {
    price: calculate_price(product.base_price, &selection),
    product_name: product.name.clone(),
    selection,
  };
  Order::new("Test Customer", "test@example.com", vec![item])
}

/// `POST /test-email`: await a single confirmation for a throwaway order.
///
/// The sample order is not added to the order log.
pub async fn test_email<F, N>(
  State(state): State<AppState<F, N>>,
) -> Result<Json<TestEmailResponse>, ApiError>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let product = state
    .catalog
    .products()
    .first()
    .ok_or_else(|| ApiError::NotFound("catalog is empty".to_string()))?;
  let order = sample_order(product);

  let email_sent = match state.orders.notifier().send_order_confirmation(&order).await {
    Ok(delivery) => delivery == Delivery::Sent,
    Err(e) => {
      tracing::warn!(order_id = %order.id, error = %e, "test email failed");
      false
    }
  };

  Ok(Json(TestEmailResponse { email_sent, order_id: order.id }))
}
