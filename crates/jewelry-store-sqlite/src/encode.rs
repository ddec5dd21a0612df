//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, prices are decimal strings and UUIDs are
//! hyphenated lowercase strings.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use jewelry_core::{favorite::FavoriteItem, selection::Customization};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_price(price: Decimal) -> String { price.to_string() }

pub fn decode_price(s: &str) -> Result<Decimal> { Ok(Decimal::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawFavorite::from_row`].
pub const FAVORITE_COLUMNS: &str = "id, product_id, product_name, metal, stone, \
                                    carat_size, ring_size, necklace_size, price, created_at";

/// Raw values read directly from a `favorites` row.
pub struct RawFavorite {
  pub id:            String,
  pub product_id:    u32,
  pub product_name:  String,
  pub metal:         String,
  pub stone:         String,
  pub carat_size:    String,
  pub ring_size:     Option<String>,
  pub necklace_size: Option<String>,
  pub price:         String,
  pub created_at:    String,
}

impl RawFavorite {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      product_id:    row.get(1)?,
      product_name:  row.get(2)?,
      metal:         row.get(3)?,
      stone:         row.get(4)?,
      carat_size:    row.get(5)?,
      ring_size:     row.get(6)?,
      necklace_size: row.get(7)?,
      price:         row.get(8)?,
      created_at:    row.get(9)?,
    })
  }

  pub fn from_item(item: &FavoriteItem) -> Self {
    Self {
      id:            encode_uuid(item.id),
      product_id:    item.selection.product_id,
      product_name:  item.product_name.clone(),
      metal:         item.selection.metal.clone(),
      stone:         item.selection.stone.clone(),
      carat_size:    item.selection.carat_size.clone(),
      ring_size:     item.selection.ring_size.clone(),
      necklace_size: item.selection.necklace_size.clone(),
      price:         encode_price(item.price),
      created_at:    encode_dt(item.created_at),
    }
  }

  pub fn into_item(self) -> Result<FavoriteItem> {
    Ok(FavoriteItem {
      id:           decode_uuid(&self.id)?,
      selection:    Customization {
        product_id:    self.product_id,
        metal:         self.metal,
        stone:         self.stone,
        carat_size:    self.carat_size,
        ring_size:     self.ring_size,
        necklace_size: self.necklace_size,
      },
      product_name: self.product_name,
      price:        decode_price(&self.price)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
