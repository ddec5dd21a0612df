//! JSON REST API for the jewelry storefront.
//!
//! Exposes an axum [`Router`] over an [`AppState`]: the catalog, the cart,
//! any [`FavoriteStore`] and an [`OrderBook`] wired to any [`Notifier`].
//! CORS, TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = jewelry_api::api_router(state, config.dev_routes);
//! axum::serve(listener, app).await?;
//! ```

pub mod cart;
pub mod error;
pub mod favorites;
pub mod orders;
pub mod products;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use jewelry_core::{
  cart::Cart,
  catalog::Catalog,
  favorite::FavoriteStore,
  order::{Notifier, OrderBook},
};
use serde::Serialize;

pub use error::ApiError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Everything a handler can reach. Built once by the composition root and
/// shared by reference across requests.
pub struct AppState<F, N> {
  pub catalog:   Arc<Catalog>,
  pub cart:      Arc<Cart>,
  pub favorites: Arc<F>,
  pub orders:    Arc<OrderBook<N>>,
}

impl<F, N> Clone for AppState<F, N> {
  fn clone(&self) -> Self {
    Self {
      catalog:   Arc::clone(&self.catalog),
      cart:      Arc::clone(&self.cart),
      favorites: Arc::clone(&self.favorites),
      orders:    Arc::clone(&self.orders),
    }
  }
}

impl<F, N: Notifier> AppState<F, N> {
  /// Fresh state with an empty cart and no orders.
  pub fn new(catalog: Catalog, favorites: F, notifier: N) -> Self {
    Self {
      catalog:   Arc::new(catalog),
      cart:      Arc::new(Cart::new()),
      favorites: Arc::new(favorites),
      orders:    Arc::new(OrderBook::new(Arc::new(notifier))),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// `POST /test-email` is only mounted when `dev_routes` is set. The returned
/// `Router<()>` can be nested into any parent router.
pub fn api_router<F, N>(state: AppState<F, N>, dev_routes: bool) -> Router<()>
where
  F: FavoriteStore + 'static,
  N: Notifier,
{
  let router = Router::new()
    .route("/health", get(health))
    // Catalog
    .route("/products", get(products::list::<F, N>))
    .route("/options", get(products::options))
    .route("/customize", post(products::customize::<F, N>))
    // Cart
    .route("/cart", get(cart::get::<F, N>).post(cart::add::<F, N>))
    .route("/cart/{index}", delete(cart::remove::<F, N>))
    // Orders
    .route("/checkout", post(orders::checkout::<F, N>))
    .route("/orders", get(orders::list::<F, N>))
    .route("/orders/{id}", get(orders::get_one::<F, N>))
    // Favorites
    .route(
      "/favorites",
      get(favorites::list::<F, N>)
        .post(favorites::add::<F, N>)
        .delete(favorites::clear::<F, N>),
    )
    .route("/favorites/check", get(favorites::check::<F, N>))
    .route("/favorites/{id}", delete(favorites::remove::<F, N>))
    .route("/favorites/{id}/reprice", post(favorites::reprice::<F, N>));

  let router = if dev_routes {
    router.route("/test-email", post(orders::test_email::<F, N>))
  } else {
    router
  };

  router.with_state(state)
}

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub timestamp: DateTime<Utc>,
}

/// `GET /health`
pub async fn health() -> Json<Health> {
  Json(Health { status: "Healthy", timestamp: Utc::now() })
}
