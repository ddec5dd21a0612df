//! Customization selections: the choices that define one priced design.

use serde::{Deserialize, Serialize};

use crate::{catalog::ProductCategory, pricing::Stone};

/// The choices a customer made for one product.
///
/// Metal, stone and carat travel as free strings so that unrecognised values
/// price at a zero surcharge instead of being rejected. Two selections are the
/// same design exactly when all six fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
  pub product_id:    u32,
  #[serde(default)]
  pub metal:         String,
  #[serde(default = "default_stone")]
  pub stone:         String,
  #[serde(default)]
  pub carat_size:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ring_size:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub necklace_size: Option<String>,
}

fn default_stone() -> String { Stone::Diamond.to_string() }

impl Customization {
  /// Treat blank size strings as absent.
  pub fn normalized(mut self) -> Self {
    self.ring_size = self.ring_size.filter(|s| !s.trim().is_empty());
    self.necklace_size = self.necklace_size.filter(|s| !s.trim().is_empty());
    self
  }

  /// Drop the size field that does not apply to `category`.
  pub fn for_category(mut self, category: ProductCategory) -> Self {
    match category {
      ProductCategory::Ring => self.necklace_size = None,
      ProductCategory::Necklace => self.ring_size = None,
    }
    self
  }

  /// The size that was chosen, labelled for display.
  pub fn size_label(&self) -> Option<String> {
    match (&self.ring_size, &self.necklace_size) {
      (Some(ring), _) => Some(format!("Ring Size {ring}")),
      (None, Some(length)) => Some(format!("Necklace Length {length}")),
      (None, None) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn selection() -> Customization {
    Customization {
      product_id:    1,
      metal:         "Gold".into(),
      stone:         "Diamond".into(),
      carat_size:    "2ct".into(),
      ring_size:     Some("7".into()),
      necklace_size: Some("18\"".into()),
    }
  }

  #[test]
  fn missing_stone_defaults_to_diamond() {
    let parsed: Customization =
      serde_json::from_str(r#"{"productId":2,"metal":"Silver","caratSize":"1ct"}"#)
        .unwrap();
    assert_eq!(parsed.stone, "Diamond");
    assert_eq!(parsed.ring_size, None);
  }

  #[test]
  fn blank_sizes_normalize_to_none() {
    let mut s = selection();
    s.ring_size = Some("  ".into());
    let s = s.normalized();
    assert_eq!(s.ring_size, None);
    assert_eq!(s.necklace_size.as_deref(), Some("18\""));
  }

  #[test]
  fn category_keeps_only_matching_size() {
    let ring = selection().for_category(ProductCategory::Ring);
    assert_eq!(ring.ring_size.as_deref(), Some("7"));
    assert_eq!(ring.necklace_size, None);

    let necklace = selection().for_category(ProductCategory::Necklace);
    assert_eq!(necklace.ring_size, None);
    assert_eq!(necklace.size_label().as_deref(), Some("Necklace Length 18\""));
  }
}
