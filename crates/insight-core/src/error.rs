//! Error types for `insight-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown impact level: {0:?}")]
  UnknownImpactLevel(String),

  #[error("unknown change direction: {0:?}")]
  UnknownChangeDirection(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
