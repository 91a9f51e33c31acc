//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use insight_core::query::QueryError;
use thiserror::Error;

use crate::envelope::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

impl<E> From<QueryError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: QueryError<E>) -> Self {
    match e {
      QueryError::NotFound(symbol) => {
        ApiError::NotFound(format!("Indicator {symbol} not found"))
      }
      QueryError::Store(e) => ApiError::store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, Envelope::failure(None, m)),
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Envelope::failure(None, m))
      }
      ApiError::Store(e) => {
        // Details stay in the log; callers only learn that the read failed.
        tracing::error!(error = %e, "store failure while serving request");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Envelope::failure(
            Some("Failed to fetch data".to_owned()),
            "Internal server error",
          ),
        )
      }
    };
    (status, body).into_response()
  }
}
