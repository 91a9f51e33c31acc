//! Handler for `GET /overview`.
//!
//! `latestData` and `upcomingEvents` are arrays holding at most one row each;
//! an empty array means nothing has been released or scheduled yet.

use std::sync::Arc;

use axum::extract::{Query, State};
use insight_core::{
  indicator::Indicator,
  query,
  release::{DataPoint, UpcomingEvent},
  store::IndicatorStore,
};
use serde::{Deserialize, Serialize};

use crate::{envelope::Envelope, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewParams {
  /// Required: the indicator symbol.
  pub selected_indicator: Option<String>,
}

/// A stored row annotated with the owning indicator's name and symbol.
#[derive(Debug, Serialize)]
pub struct WithIndicator<T> {
  #[serde(flatten)]
  pub row:              T,
  pub indicator_name:   String,
  pub indicator_symbol: String,
}

impl<T> WithIndicator<T> {
  fn new(row: T, indicator: &Indicator) -> Self {
    Self {
      row,
      indicator_name: indicator.name.clone(),
      indicator_symbol: indicator.symbol.clone(),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewBody {
  pub latest_data:     Vec<WithIndicator<DataPoint>>,
  pub upcoming_events: Vec<WithIndicator<UpcomingEvent>>,
}

/// `GET /overview?selectedIndicator=<symbol>`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<OverviewParams>,
) -> Result<Envelope<OverviewBody>, ApiError>
where
  S: IndicatorStore,
{
  let symbol = params
    .selected_indicator
    .filter(|s| !s.trim().is_empty())
    .ok_or_else(|| {
      ApiError::BadRequest("selectedIndicator parameter is required".into())
    })?;

  let overview = query::overview(store.as_ref(), &symbol, None).await?;
  let indicator = &overview.indicator;

  let body = OverviewBody {
    latest_data:     overview
      .latest
      .into_iter()
      .map(|dp| WithIndicator::new(dp, indicator))
      .collect(),
    upcoming_events: overview
      .next_event
      .into_iter()
      .map(|ev| WithIndicator::new(ev, indicator))
      .collect(),
  };
  Ok(Envelope::ok(body, "Overview data retrieved successfully"))
}
