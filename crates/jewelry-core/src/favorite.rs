//! Favorites: saved designs kept apart from the cart.
//!
//! A design may be saved once. The duplicate test covers the six selection
//! fields only; stored name and price play no part in it.

use std::{
  convert::Infallible,
  future::Future,
  sync::{PoisonError, RwLock},
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::selection::Customization;

// ─── Types ───────────────────────────────────────────────────────────────────

/// A saved design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
  pub id:           Uuid,
  #[serde(flatten)]
  pub selection:    Customization,
  pub product_name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price:        Decimal,
  pub created_at:   DateTime<Utc>,
}

impl FavoriteItem {
  /// Stamp a new favorite with a fresh id and the current time.
  pub fn from_new(input: NewFavorite) -> Self {
    Self {
      id:           Uuid::new_v4(),
      selection:    input.selection,
      product_name: input.product_name,
      price:        input.price,
      created_at:   Utc::now(),
    }
  }

  /// A copy of this entry carrying `price`.
  pub fn with_price(&self, price: Decimal) -> Self {
    Self { price, ..self.clone() }
  }
}

/// Input for [`FavoriteStore::add`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
  #[serde(flatten)]
  pub selection:    Customization,
  #[serde(default)]
  pub product_name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price:        Decimal,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a favorites backend.
///
/// Found / not-found outcomes are ordinary return values (`bool`, `Option`);
/// `Self::Error` is reserved for backend failures.
pub trait FavoriteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Save a design. Returns `None`, inserting nothing, when a favorite with
  /// the same selection already exists.
  fn add(
    &self,
    input: NewFavorite,
  ) -> impl Future<Output = Result<Option<FavoriteItem>, Self::Error>> + Send + '_;

  /// Delete by id. Returns `false` if the id is unknown.
  fn remove(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<FavoriteItem>, Self::Error>> + Send + '_;

  /// Whether a favorite with exactly this selection exists.
  fn is_favorited<'a>(
    &'a self,
    selection: &'a Customization,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Replace the entry at `id` with a copy carrying `price`. Returns the new
  /// entry, or `None` if the id is unknown.
  fn update_price(
    &self,
    id: Uuid,
    price: Decimal,
  ) -> impl Future<Output = Result<Option<FavoriteItem>, Self::Error>> + Send + '_;

  /// All favorites in insertion order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<FavoriteItem>, Self::Error>> + Send + '_;

  /// Remove every favorite, returning how many were removed.
  fn clear(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// Volatile favorites held in process memory.
#[derive(Debug, Default)]
pub struct MemoryFavorites {
  entries: RwLock<Vec<FavoriteItem>>,
}

impl MemoryFavorites {
  pub fn new() -> Self { Self::default() }
}

impl FavoriteStore for MemoryFavorites {
  type Error = Infallible;

  async fn add(&self, input: NewFavorite) -> Result<Option<FavoriteItem>, Infallible> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    if entries.iter().any(|f| f.selection == input.selection) {
      return Ok(None);
    }
    let item = FavoriteItem::from_new(input);
    entries.push(item.clone());
    Ok(Some(item))
  }

  async fn remove(&self, id: Uuid) -> Result<bool, Infallible> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    let before = entries.len();
    entries.retain(|f| f.id != id);
    Ok(entries.len() != before)
  }

  async fn get(&self, id: Uuid) -> Result<Option<FavoriteItem>, Infallible> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.iter().find(|f| f.id == id).cloned())
  }

  async fn is_favorited(&self, selection: &Customization) -> Result<bool, Infallible> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    Ok(entries.iter().any(|f| &f.selection == selection))
  }

  async fn update_price(
    &self,
    id: Uuid,
    price: Decimal,
  ) -> Result<Option<FavoriteItem>, Infallible> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    let Some(slot) = entries.iter_mut().find(|f| f.id == id) else {
      return Ok(None);
    };
    *slot = slot.with_price(price);
    Ok(Some(slot.clone()))
  }

  async fn list(&self) -> Result<Vec<FavoriteItem>, Infallible> {
    Ok(self.entries.read().unwrap_or_else(PoisonError::into_inner).clone())
  }

  async fn clear(&self) -> Result<usize, Infallible> {
    let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
    let removed = entries.len();
    entries.clear();
    Ok(removed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn design(metal: &str) -> NewFavorite {
    NewFavorite {
      selection:    Customization {
        product_id:    1,
        metal:         metal.into(),
        stone:         "Diamond".into(),
        carat_size:    "2ct".into(),
        ring_size:     Some("7".into()),
        necklace_size: None,
      },
      product_name: "Ring Base".into(),
      price:        Decimal::new(3300, 0),
    }
  }

  #[tokio::test]
  async fn duplicate_selection_is_rejected() {
    let store = MemoryFavorites::new();
    assert!(store.add(design("Gold")).await.unwrap().is_some());

    let mut same = design("Gold");
    same.price = Decimal::new(1, 0);
    same.product_name = "Renamed".into();
    assert!(store.add(same).await.unwrap().is_none());
    assert_eq!(store.list().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn any_differing_field_is_a_new_design() {
    let store = MemoryFavorites::new();
    store.add(design("Gold")).await.unwrap();

    let mut other_size = design("Gold");
    other_size.selection.ring_size = Some("8".into());
    let mut no_size = design("Gold");
    no_size.selection.ring_size = None;
    let mut other_product = design("Gold");
    other_product.selection.product_id = 2;

    for input in [design("Silver"), other_size, no_size, other_product] {
      assert!(store.add(input).await.unwrap().is_some());
    }
    assert_eq!(store.list().await.unwrap().len(), 5);
  }

  #[tokio::test]
  async fn remove_known_and_unknown_ids() {
    let store = MemoryFavorites::new();
    let gold = store.add(design("Gold")).await.unwrap().unwrap();
    store.add(design("Silver")).await.unwrap();

    assert!(!store.remove(Uuid::new_v4()).await.unwrap());
    assert_eq!(store.list().await.unwrap().len(), 2);

    assert!(store.remove(gold.id).await.unwrap());
    let left = store.list().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].selection.metal, "Silver");
  }

  #[tokio::test]
  async fn is_favorited_compares_selection_only() {
    let store = MemoryFavorites::new();
    store.add(design("Gold")).await.unwrap();

    assert!(store.is_favorited(&design("Gold").selection).await.unwrap());
    assert!(!store.is_favorited(&design("Silver").selection).await.unwrap());
  }

  #[tokio::test]
  async fn update_price_replaces_entry() {
    let store = MemoryFavorites::new();
    let saved = store.add(design("Gold")).await.unwrap().unwrap();

    let updated = store
      .update_price(saved.id, Decimal::new(3400, 0))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(updated.price, Decimal::new(3400, 0));
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.created_at, saved.created_at);
    assert_eq!(store.get(saved.id).await.unwrap(), Some(updated));

    assert!(store.update_price(Uuid::new_v4(), Decimal::ONE).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn list_keeps_insertion_order_and_clear_empties() {
    let store = MemoryFavorites::new();
    for metal in ["Silver", "Gold", "Rose Gold"] {
      store.add(design(metal)).await.unwrap();
    }
    let metals: Vec<_> = store
      .list()
      .await
      .unwrap()
      .into_iter()
      .map(|f| f.selection.metal)
      .collect();
    assert_eq!(metals, ["Silver", "Gold", "Rose Gold"]);

    assert_eq!(store.clear().await.unwrap(), 3);
    assert!(store.list().await.unwrap().is_empty());
  }
}
