//! Handler for `GET /history/{symbol}`.
//!
//! The series is shaped for a line-chart widget: one `labels` axis and a
//! single dataset.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use insight_core::{
  indicator::Indicator,
  period::Period,
  query,
  series::Series,
  store::IndicatorStore,
};
use serde::{Deserialize, Serialize};

use crate::{envelope::Envelope, error::ApiError};

const BORDER_COLOR: &str = "rgb(59, 130, 246)";
const BACKGROUND_COLOR: &str = "rgba(59, 130, 246, 0.1)";
const TENSION: f64 = 0.1;

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
  /// `12m` or `3y`; anything else is treated as `12m`.
  pub period: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
  pub label:            String,
  pub data:             Vec<f64>,
  pub border_color:     &'static str,
  pub background_color: &'static str,
  pub tension:          f64,
}

#[derive(Debug, Serialize)]
pub struct ChartData {
  pub labels:   Vec<NaiveDate>,
  pub datasets: Vec<ChartDataset>,
}

impl From<Series> for ChartData {
  fn from(series: Series) -> Self {
    let labels = series.labels().collect();
    let data = series.values().collect();
    Self {
      labels,
      datasets: vec![ChartDataset {
        label: series.label,
        data,
        border_color: BORDER_COLOR,
        background_color: BACKGROUND_COLOR,
        tension: TENSION,
      }],
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryBody {
  pub indicator:  Indicator,
  /// `null` when the indicator has no points in the window.
  pub chart_data: Option<ChartData>,
  pub period:     Period,
}

/// `GET /history/{symbol}[?period=12m|3y]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Path(symbol): Path<String>,
  Query(params): Query<HistoryParams>,
) -> Result<Envelope<HistoryBody>, ApiError>
where
  S: IndicatorStore,
{
  let period = Period::from_token(params.period.as_deref());
  let hs = query::historical_series(store.as_ref(), &symbol, period, None).await?;

  Ok(Envelope::ok(
    HistoryBody {
      indicator:  hs.indicator,
      chart_data: hs.series.map(ChartData::from),
      period:     hs.period,
    },
    "Historical data retrieved successfully",
  ))
}
