//! The product catalog: the fixed set of base pieces a customer can
//! customize.
//!
//! Products are seeded once at startup and never mutated afterwards.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Product ─────────────────────────────────────────────────────────────────

/// What kind of piece a product is. Decides which size field applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
  Ring,
  Necklace,
}

/// A purchasable base product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id:         u32,
  pub name:       String,
  #[serde(with = "rust_decimal::serde::float", alias = "base_price")]
  pub base_price: Decimal,
  pub category:   ProductCategory,
}

impl Product {
  pub fn new(
    id: u32,
    name: impl Into<String>,
    base_price: Decimal,
    category: ProductCategory,
  ) -> Self {
    Self { id, name: name.into(), base_price, category }
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Immutable, validated list of products, in the order they were supplied.
#[derive(Debug, Clone)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  /// Build a catalog. An empty list or a repeated id is rejected; the server
  /// treats either as a fatal startup error.
  pub fn new(products: Vec<Product>) -> Result<Self> {
    if products.is_empty() {
      return Err(Error::EmptyCatalog);
    }

    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
      if !seen.insert(product.id) {
        return Err(Error::DuplicateProduct(product.id));
      }
    }

    Ok(Self { products })
  }

  /// The two base pieces the storefront ships with.
  pub fn default_products() -> Vec<Product> {
    vec![
      Product::new(1, "Ring Base", Decimal::new(200, 0), ProductCategory::Ring),
      Product::new(
        2,
        "Necklace Base",
        Decimal::new(150, 0),
        ProductCategory::Necklace,
      ),
    ]
  }

  pub fn products(&self) -> &[Product] { &self.products }

  pub fn get(&self, id: u32) -> Option<&Product> {
    self.products.iter().find(|p| p.id == id)
  }

  pub fn contains(&self, id: u32) -> bool { self.get(id).is_some() }
}

impl Default for Catalog {
  fn default() -> Self {
    Self { products: Self::default_products() }
  }
}
