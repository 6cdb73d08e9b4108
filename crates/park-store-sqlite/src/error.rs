//! Error type for `park-store-sqlite`.

use park_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain outcome (not found, already exists) detected by the store.
  #[error(transparent)]
  Core(#[from] park_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored column held a value the domain types cannot represent.
  #[error("decode error: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn into_domain(self) -> Result<park_core::Error, Self> {
    match self {
      Error::Core(e) => Ok(e),
      other => Err(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
