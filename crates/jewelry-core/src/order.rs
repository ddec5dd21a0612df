//! Orders and the append-only order log.
//!
//! An order is an immutable snapshot of cart lines plus customer identity.
//! Creating one appends it to the log and hands a copy to the [`Notifier`] on
//! a detached task; the order stands whatever the notification outcome.

use std::{
  future::Future,
  sync::{Arc, PoisonError, RwLock},
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::cart::{CartItem, sum_prices};

// ─── Order ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id:             Uuid,
  pub customer_name:  String,
  pub customer_email: String,
  pub items:          Vec<CartItem>,
  #[serde(with = "rust_decimal::serde::float")]
  pub total:          Decimal,
  pub created_at:     DateTime<Utc>,
}

impl Order {
  /// Build an order, recomputing the total from the line prices.
  pub fn new(
    customer_name: impl Into<String>,
    customer_email: impl Into<String>,
    items: Vec<CartItem>,
  ) -> Self {
    Self {
      id:             Uuid::new_v4(),
      customer_name:  customer_name.into(),
      customer_email: customer_email.into(),
      total:          sum_prices(&items),
      items,
      created_at:     Utc::now(),
    }
  }
}

// ─── Notification ────────────────────────────────────────────────────────────

/// Outcome of a confirmation attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
  Sent,
  /// Delivery is switched off (no credential configured).
  Skipped,
}

/// Sink for order confirmations.
pub trait Notifier: Send + Sync + 'static {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Make a single delivery attempt for `order`.
  fn send_order_confirmation<'a>(
    &'a self,
    order: &'a Order,
  ) -> impl Future<Output = Result<Delivery, Self::Error>> + Send + 'a;
}

// ─── Order log ───────────────────────────────────────────────────────────────

/// Creates orders, keeps the complete order history and dispatches
/// confirmations.
pub struct OrderBook<N> {
  orders:   RwLock<Vec<Order>>,
  notifier: Arc<N>,
}

impl<N: Notifier> OrderBook<N> {
  pub fn new(notifier: Arc<N>) -> Self {
    Self { orders: RwLock::new(Vec::new()), notifier }
  }

  pub fn notifier(&self) -> &N { &self.notifier }

  /// Record an order for `items` and fire off its confirmation.
  ///
  /// Rejecting an empty cart is the caller's job.
  pub fn create_order(
    &self,
    customer_name: impl Into<String>,
    customer_email: impl Into<String>,
    items: Vec<CartItem>,
  ) -> Order {
    let order = Order::new(customer_name, customer_email, items);
    self
      .orders
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .push(order.clone());

    tracing::info!(
      order_id = %order.id,
      items = order.items.len(),
      total = %order.total,
      "order created"
    );

    self.dispatch(order.clone());
    order
  }

  /// Spawn one confirmation attempt without waiting for it.
  fn dispatch(&self, order: Order) {
    let Ok(handle) = Handle::try_current() else {
      tracing::warn!(order_id = %order.id, "no async runtime; confirmation not sent");
      return;
    };

    let notifier = Arc::clone(&self.notifier);
    handle.spawn(async move {
      match notifier.send_order_confirmation(&order).await {
        Ok(Delivery::Sent) => {
          tracing::info!(order_id = %order.id, "order confirmation sent");
        }
        Ok(Delivery::Skipped) => {
          tracing::debug!(order_id = %order.id, "order confirmation skipped");
        }
        Err(e) => {
          tracing::warn!(order_id = %order.id, error = %e, "order confirmation failed");
        }
      }
    });
  }

  pub fn list(&self) -> Vec<Order> {
    self.orders.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn get(&self, id: Uuid) -> Option<Order> {
    self
      .orders
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .find(|o| o.id == id)
      .cloned()
  }

  pub fn count(&self) -> usize {
    self.orders.read().unwrap_or_else(PoisonError::into_inner).len()
  }
}
