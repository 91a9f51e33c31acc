//! The `{success, data | error, message, timestamp}` wrapper every response
//! is sent in.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success:   bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:      Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:     Option<String>,
  pub message:   String,
  pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T, message: impl Into<String>) -> Self {
    Self {
      success:   true,
      data:      Some(data),
      error:     None,
      message:   message.into(),
      timestamp: Utc::now(),
    }
  }
}

impl Envelope<()> {
  /// A successful response with no payload.
  pub fn message(message: impl Into<String>) -> Self {
    Self {
      success:   true,
      data:      None,
      error:     None,
      message:   message.into(),
      timestamp: Utc::now(),
    }
  }

  pub fn failure(error: Option<String>, message: impl Into<String>) -> Self {
    Self {
      success: false,
      data: None,
      error,
      message: message.into(),
      timestamp: Utc::now(),
    }
  }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
  fn into_response(self) -> Response { Json(self).into_response() }
}
