//! Error type for `jewelry-mail`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("mail provider rejected the message: {status}")]
  Rejected { status: reqwest::StatusCode },

  #[error("template error: {0}")]
  Template(#[from] askama::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
