//! Error types for `jewelry-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("catalog has no products")]
  EmptyCatalog,

  #[error("duplicate product id in catalog: {0}")]
  DuplicateProduct(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
