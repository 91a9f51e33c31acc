//! Error type for `insight-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] insight_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// A write referenced an indicator id that does not exist.
  #[error("indicator not found: {0}")]
  UnknownIndicator(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
