//! Error type for `refrate-store-sqlite`.

use refrate_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] refrate_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("column decode error: {0}")]
  Decode(String),

  /// Provider upsert called without an external reference.
  #[error("provider match upsert requires an external reference")]
  MissingExternalRef,
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    Self::Database(tokio_rusqlite::Error::Rusqlite(e))
  }
}

impl Classify for Error {
  fn kind(&self) -> Option<ErrorKind> {
    match self {
      Self::Core(e) => e.kind(),
      Self::MissingExternalRef => Some(ErrorKind::InvalidArgument),
      // Storage faults and codec bugs have no client-facing kind.
      Self::Database(_) | Self::Uuid(_) | Self::DateParse(_)
      | Self::Decode(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
