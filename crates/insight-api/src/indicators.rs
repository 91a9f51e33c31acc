//! Handler for `GET /indicators`.

use std::sync::Arc;

use axum::extract::State;
use insight_core::{indicator::Indicator, query, store::IndicatorStore};

use crate::{envelope::Envelope, error::ApiError};

/// `GET /indicators`: every indicator, most important first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Envelope<Vec<Indicator>>, ApiError>
where
  S: IndicatorStore,
{
  let indicators = query::indicator_list(store.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Envelope::ok(indicators, "Indicators list retrieved successfully"))
}
