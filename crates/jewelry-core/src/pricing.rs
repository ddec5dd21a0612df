//! Pricing rules: base price plus flat surcharges for metal, stone and carat.
//!
//! Unknown metal or carat strings contribute nothing. The diamond surcharge is
//! applied to every piece whatever stone string was sent, since diamonds are
//! included by default. Sizes never affect the price.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::selection::Customization;

/// Ring sizes offered to customers.
pub const RING_SIZES: &[&str] = &["5", "6", "7", "8", "9", "10"];

/// Necklace lengths offered to customers.
pub const NECKLACE_SIZES: &[&str] = &["18\"", "20\"", "22\""];

// ─── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Metal {
  Silver,
  Gold,
  #[strum(serialize = "Rose Gold")]
  RoseGold,
}

impl Metal {
  pub fn surcharge(self) -> Decimal {
    match self {
      Metal::Silver => Decimal::ZERO,
      Metal::Gold => Decimal::new(100, 0),
      Metal::RoseGold => Decimal::new(150, 0),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Stone {
  Diamond,
}

impl Stone {
  pub fn surcharge(self) -> Decimal {
    match self {
      Stone::Diamond => Decimal::new(500, 0),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum CaratSize {
  #[strum(serialize = "1ct")]
  One,
  #[strum(serialize = "2ct")]
  Two,
  #[strum(serialize = "3ct")]
  Three,
}

impl CaratSize {
  pub fn surcharge(self) -> Decimal {
    match self {
      CaratSize::One => Decimal::new(1000, 0),
      CaratSize::Two => Decimal::new(2500, 0),
      CaratSize::Three => Decimal::new(4500, 0),
    }
  }
}

// ─── Surcharges ──────────────────────────────────────────────────────────────

pub fn metal_surcharge(metal: &str) -> Decimal {
  metal.parse::<Metal>().map_or(Decimal::ZERO, Metal::surcharge)
}

/// Always the diamond surcharge; the stone string is not consulted.
pub fn stone_surcharge(_stone: &str) -> Decimal { Stone::Diamond.surcharge() }

pub fn carat_surcharge(carat_size: &str) -> Decimal {
  carat_size.parse::<CaratSize>().map_or(Decimal::ZERO, CaratSize::surcharge)
}

/// Final price for `selection` on a product costing `base_price`, rounded to
/// cents with midpoint-to-even rounding.
pub fn calculate_price(base_price: Decimal, selection: &Customization) -> Decimal {
  let price = base_price
    + metal_surcharge(&selection.metal)
    + stone_surcharge(&selection.stone)
    + carat_surcharge(&selection.carat_size);
  price.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

// ─── Option sheet ────────────────────────────────────────────────────────────

/// One selectable option and what it adds to the price.
#[derive(Debug, Clone, Serialize)]
pub struct PricedOption {
  pub name:      String,
  #[serde(with = "rust_decimal::serde::float")]
  pub surcharge: Decimal,
}

/// Everything a client needs to render the customization choices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSheet {
  pub metals:         Vec<PricedOption>,
  pub stones:         Vec<PricedOption>,
  pub carat_sizes:    Vec<PricedOption>,
  pub ring_sizes:     Vec<&'static str>,
  pub necklace_sizes: Vec<&'static str>,
}

impl OptionSheet {
  pub fn current() -> Self {
    Self {
      metals:         Metal::iter()
        .map(|m| PricedOption { name: m.to_string(), surcharge: m.surcharge() })
        .collect(),
      stones:         Stone::iter()
        .map(|s| PricedOption { name: s.to_string(), surcharge: s.surcharge() })
        .collect(),
      carat_sizes:    CaratSize::iter()
        .map(|c| PricedOption { name: c.to_string(), surcharge: c.surcharge() })
        .collect(),
      ring_sizes:     RING_SIZES.to_vec(),
      necklace_sizes: NECKLACE_SIZES.to_vec(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn selection(metal: &str, stone: &str, carat: &str) -> Customization {
    Customization {
      product_id:    1,
      metal:         metal.into(),
      stone:         stone.into(),
      carat_size:    carat.into(),
      ring_size:     None,
      necklace_size: None,
    }
  }

  #[test]
  fn gold_two_carat_ring() {
    let price = calculate_price(Decimal::new(200, 0), &selection("Gold", "Diamond", "2ct"));
    assert_eq!(price, Decimal::new(330000, 2));
  }

  #[test]
  fn every_known_combination_matches_the_tables() {
    let base = Decimal::new(150, 0);
    for metal in Metal::iter() {
      for carat in CaratSize::iter() {
        let expected = base + metal.surcharge() + Decimal::new(500, 0) + carat.surcharge();
        let got = calculate_price(
          base,
          &selection(&metal.to_string(), "Diamond", &carat.to_string()),
        );
        assert_eq!(got, expected, "{metal} / {carat}");
      }
    }
  }

  #[test]
  fn rose_gold_uses_spaced_name() {
    assert_eq!(metal_surcharge("Rose Gold"), Decimal::new(150, 0));
    assert_eq!(metal_surcharge("RoseGold"), Decimal::ZERO);
  }

  #[test]
  fn unknown_values_add_nothing() {
    let price = calculate_price(Decimal::new(200, 0), &selection("Platinum", "Diamond", "9ct"));
    assert_eq!(price, Decimal::new(700, 0));
  }

  #[test]
  fn diamond_applies_regardless_of_stone() {
    let with_ruby = calculate_price(Decimal::new(200, 0), &selection("Silver", "Ruby", "1ct"));
    let with_blank = calculate_price(Decimal::new(200, 0), &selection("Silver", "", "1ct"));
    assert_eq!(with_ruby, Decimal::new(1700, 0));
    assert_eq!(with_blank, with_ruby);
  }

  #[test]
  fn sizes_do_not_change_price() {
    let mut sized = selection("Gold", "Diamond", "1ct");
    sized.ring_size = Some("9".into());
    let plain = selection("Gold", "Diamond", "1ct");
    assert_eq!(
      calculate_price(Decimal::new(200, 0), &sized),
      calculate_price(Decimal::new(200, 0), &plain),
    );
  }

  #[test]
  fn rounds_half_to_even() {
    let s = selection("", "Diamond", "");
    // 0.125 + 500 → 500.12 ; 0.135 + 500 → 500.14
    assert_eq!(calculate_price(Decimal::new(125, 3), &s), Decimal::new(50012, 2));
    assert_eq!(calculate_price(Decimal::new(135, 3), &s), Decimal::new(50014, 2));
  }

  #[test]
  fn option_sheet_lists_every_choice() {
    let sheet = OptionSheet::current();
    let metals: Vec<_> = sheet.metals.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(metals, ["Silver", "Gold", "Rose Gold"]);
    let carats: Vec<_> = sheet.carat_sizes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(carats, ["1ct", "2ct", "3ct"]);
    assert_eq!(sheet.ring_sizes.len(), 6);
    assert_eq!(sheet.necklace_sizes, NECKLACE_SIZES);
  }
}
