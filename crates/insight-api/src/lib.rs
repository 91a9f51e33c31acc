//! JSON REST API for Macro Insight.
//!
//! Exposes an axum [`Router`] backed by any
//! [`insight_core::store::IndicatorStore`]. Every response, success or
//! failure, is wrapped in an [`Envelope`]. CORS, tracing, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", insight_api::api_router(store.clone()))
//! ```

pub mod envelope;
pub mod error;
pub mod history;
pub mod indicators;
pub mod logic_chain;
pub mod overview;

use std::sync::Arc;

use axum::{Router, routing::get};
use insight_core::store::IndicatorStore;

pub use envelope::Envelope;
pub use error::ApiError;

/// Build the read-only API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: IndicatorStore + 'static,
{
  Router::new()
    .route("/indicators", get(indicators::list::<S>))
    .route("/overview", get(overview::handler::<S>))
    .route("/logic-chain/{symbol}", get(logic_chain::handler::<S>))
    .route("/history/{symbol}", get(history::handler::<S>))
    .route("/health", get(health))
    .with_state(store)
}

/// Liveness marker for `GET /health`.
pub async fn health() -> Envelope<()> {
  Envelope::message("Macro Insight API is running")
}

/// Fallback for unmatched routes, in the same envelope as everything else.
pub async fn not_found() -> ApiError {
  ApiError::NotFound("Route not found".into())
}

// ─── Router tests ─────────────────────────────────────────────────────────────
