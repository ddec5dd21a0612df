//! [`SqliteFavorites`]: the SQLite implementation of [`FavoriteStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use rust_decimal::Decimal;
use uuid::Uuid;

use jewelry_core::{
  favorite::{FavoriteItem, FavoriteStore, NewFavorite},
  selection::Customization,
};

use crate::{
  Result,
  encode::{FAVORITE_COLUMNS, RawFavorite, encode_price, encode_uuid},
  schema::SCHEMA,
};

/// `WHERE` clause matching all six selection fields. `IS` makes two absent
/// sizes compare equal.
const SAME_SELECTION: &str = "product_id = ?1 AND metal = ?2 AND stone = ?3 \
                              AND carat_size = ?4 AND ring_size IS ?5 \
                              AND necklace_size IS ?6";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A favorites store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// run on the connection's own thread, one at a time, so the duplicate check
/// and the insert in [`FavoriteStore::add`] cannot interleave with another
/// writer.
#[derive(Clone)]
pub struct SqliteFavorites {
  conn: tokio_rusqlite::Connection,
}

impl SqliteFavorites {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch(&self, id: Uuid) -> Result<Option<RawFavorite>> {
    let id_str = encode_uuid(id);
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {FAVORITE_COLUMNS} FROM favorites WHERE id = ?1"),
              rusqlite::params![id_str],
              RawFavorite::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }
}

// ─── FavoriteStore impl ──────────────────────────────────────────────────────

impl FavoriteStore for SqliteFavorites {
  type Error = crate::Error;

  async fn add(&self, input: NewFavorite) -> Result<Option<FavoriteItem>> {
    let item = FavoriteItem::from_new(input);
    let raw = RawFavorite::from_item(&item);

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists = tx
          .query_row(
            &format!("SELECT 1 FROM favorites WHERE {SAME_SELECTION}"),
            rusqlite::params![
              raw.product_id,
              raw.metal,
              raw.stone,
              raw.carat_size,
              raw.ring_size,
              raw.necklace_size,
            ],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          return Ok(false);
        }

        tx.execute(
          &format!("INSERT INTO favorites ({FAVORITE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
          rusqlite::params![
            raw.id,
            raw.product_id,
            raw.product_name,
            raw.metal,
            raw.stone,
            raw.carat_size,
            raw.ring_size,
            raw.necklace_size,
            raw.price,
            raw.created_at,
          ],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    Ok(inserted.then_some(item))
  }

  async fn remove(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM favorites WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn get(&self, id: Uuid) -> Result<Option<FavoriteItem>> {
    self.fetch(id).await?.map(RawFavorite::into_item).transpose()
  }

  async fn is_favorited(&self, selection: &Customization) -> Result<bool> {
    let selection = selection.clone();
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT 1 FROM favorites WHERE {SAME_SELECTION}"),
              rusqlite::params![
                selection.product_id,
                selection.metal,
                selection.stone,
                selection.carat_size,
                selection.ring_size,
                selection.necklace_size,
              ],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn update_price(&self, id: Uuid, price: Decimal) -> Result<Option<FavoriteItem>> {
    let Some(existing) = self.get(id).await? else {
      return Ok(None);
    };
    let replacement = existing.with_price(price);

    let id_str = encode_uuid(id);
    let price_str = encode_price(price);
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE favorites SET price = ?1 WHERE id = ?2",
          rusqlite::params![price_str, id_str],
        )?)
      })
      .await?;

    // Removed between the read and the write.
    Ok((changed > 0).then_some(replacement))
  }

  async fn list(&self) -> Result<Vec<FavoriteItem>> {
    let raws: Vec<RawFavorite> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {FAVORITE_COLUMNS} FROM favorites ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawFavorite::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFavorite::into_item).collect()
  }

  async fn clear(&self) -> Result<usize> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM favorites", [])?))
      .await?;
    Ok(removed)
  }
}
