//! SQL schema for the favorites database.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- seq preserves insertion order for listing.
CREATE TABLE IF NOT EXISTS favorites (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT NOT NULL UNIQUE,
    product_id    INTEGER NOT NULL,
    product_name  TEXT NOT NULL,
    metal         TEXT NOT NULL,
    stone         TEXT NOT NULL,
    carat_size    TEXT NOT NULL,
    ring_size     TEXT,
    necklace_size TEXT,
    price         TEXT NOT NULL,   -- exact decimal string
    created_at    TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS favorites_selection_idx
    ON favorites(product_id, metal, stone, carat_size);

PRAGMA user_version = 1;
";
