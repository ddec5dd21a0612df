//! The shopping cart: an ordered list of priced line items.
//!
//! Items are never merged. Adding the same design twice yields two lines, and
//! removal is by position, so every later line shifts down by one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::selection::Customization;

// ─── Line items ──────────────────────────────────────────────────────────────

/// One priced, customized unit in a cart or order.
///
/// `product_name` and `price` are copies taken when the line was added; there
/// is no reference back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  #[serde(flatten)]
  pub selection:    Customization,
  #[serde(default)]
  pub product_name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price:        Decimal,
}

/// Sum of line prices, exact to the cent.
pub fn sum_prices(items: &[CartItem]) -> Decimal {
  items.iter().map(|item| item.price).sum()
}

/// A consistent view of the cart taken under a single lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
  pub items:      Vec<CartItem>,
  #[serde(with = "rust_decimal::serde::float")]
  pub total:      Decimal,
  pub item_count: usize,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Process-wide cart. Every operation takes the lock once, so concurrent
/// removals cannot interleave on stale positions.
#[derive(Debug, Default)]
pub struct Cart {
  items: Mutex<Vec<CartItem>>,
}

impl Cart {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
    self.items.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Append a line. The caller has already checked the product exists.
  pub fn add(&self, item: CartItem) { self.lock().push(item); }

  /// Remove the line at zero-based `index`. Returns `None`, leaving the cart
  /// untouched, when the index is out of range.
  pub fn remove(&self, index: usize) -> Option<CartItem> {
    let mut items = self.lock();
    (index < items.len()).then(|| items.remove(index))
  }

  pub fn items(&self) -> Vec<CartItem> { self.lock().clone() }

  pub fn total(&self) -> Decimal { sum_prices(&self.lock()) }

  pub fn count(&self) -> usize { self.lock().len() }

  pub fn clear(&self) { self.lock().clear(); }

  /// Hand off every line and leave the cart empty, atomically.
  pub fn take_all(&self) -> Vec<CartItem> { std::mem::take(&mut *self.lock()) }

  pub fn summary(&self) -> CartSummary {
    let items = self.lock().clone();
    CartSummary {
      total: sum_prices(&items),
      item_count: items.len(),
      items,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(metal: &str, price: Decimal) -> CartItem {
    CartItem {
      selection:    Customization {
        product_id:    1,
        metal:         metal.into(),
        stone:         "Diamond".into(),
        carat_size:    "2ct".into(),
        ring_size:     Some("7".into()),
        necklace_size: None,
      },
      product_name: "Ring Base".into(),
      price,
    }
  }

  #[test]
  fn identical_items_are_not_merged() {
    let cart = Cart::new();
    cart.add(item("Gold", Decimal::new(3300, 0)));
    cart.add(item("Gold", Decimal::new(3300, 0)));
    assert_eq!(cart.count(), 2);

    assert!(cart.remove(1).is_some());
    assert!(cart.remove(0).is_some());
    assert_eq!(cart.count(), 0);
  }

  #[test]
  fn remove_out_of_range_leaves_cart_unchanged() {
    let cart = Cart::new();
    cart.add(item("Gold", Decimal::new(3300, 0)));
    assert!(cart.remove(1).is_none());
    assert!(cart.remove(usize::MAX).is_none());
    assert_eq!(cart.items(), vec![item("Gold", Decimal::new(3300, 0))]);
  }

  #[test]
  fn remove_shifts_later_items_down() {
    let cart = Cart::new();
    cart.add(item("Silver", Decimal::new(1700, 0)));
    cart.add(item("Gold", Decimal::new(3300, 0)));
    cart.add(item("Rose Gold", Decimal::new(3350, 0)));

    let removed = cart.remove(0).unwrap();
    assert_eq!(removed.selection.metal, "Silver");
    assert_eq!(cart.items()[0].selection.metal, "Gold");
    assert_eq!(cart.items()[1].selection.metal, "Rose Gold");
  }

  #[test]
  fn total_is_exact_to_the_cent() {
    let cart = Cart::new();
    for _ in 0..10 {
      cart.add(item("Gold", Decimal::new(10, 2)));
    }
    assert_eq!(cart.total(), Decimal::ONE);
  }

  #[test]
  fn take_all_empties_the_cart() {
    let cart = Cart::new();
    cart.add(item("Gold", Decimal::new(3300, 0)));
    cart.add(item("Silver", Decimal::new(1700, 0)));

    let taken = cart.take_all();
    assert_eq!(taken.len(), 2);
    assert_eq!(cart.count(), 0);
    assert!(cart.take_all().is_empty());
  }

  #[test]
  fn summary_matches_contents() {
    let cart = Cart::new();
    cart.add(item("Gold", Decimal::new(3300, 0)));
    cart.add(item("Silver", Decimal::new(1700, 0)));

    let summary = cart.summary();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total, Decimal::new(5000, 0));

    cart.clear();
    assert_eq!(cart.summary().item_count, 0);
    assert_eq!(cart.summary().total, Decimal::ZERO);
  }

  #[test]
  fn cart_item_json_is_flat() {
    let json = serde_json::to_value(item("Gold", Decimal::new(3300, 0))).unwrap();
    assert_eq!(json["productId"], 1);
    assert_eq!(json["productName"], "Ring Base");
    assert_eq!(json["ringSize"], "7");
    assert!(json.get("necklaceSize").is_none());
    assert_eq!(json["price"].as_f64(), Some(3300.0));
  }
}
