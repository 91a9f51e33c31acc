//! Query assembler. Turns normalized store rows into the three read shapes
//! (overview, logic chain, historical series).
//!
//! Every function here is stateless: it takes a store handle, performs reads,
//! and shapes the result. A missing indicator is [`QueryError::NotFound`];
//! missing child rows are represented as `None`, never as an error. Store
//! failures are always propagated.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{
  chain::{LogicChain, assemble_chain},
  indicator::{Indicator, sort_for_display},
  period::Period,
  release::{DataPoint, UpcomingEvent},
  series::Series,
  store::IndicatorStore,
};

#[derive(Debug, Error)]
pub enum QueryError<E> {
  #[error("indicator not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] E),
}

// ─── Result shapes ───────────────────────────────────────────────────────────

/// Most recent release plus the next scheduled one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
  pub indicator:  Indicator,
  pub latest:     Option<DataPoint>,
  pub next_event: Option<UpcomingEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainView {
  pub indicator: Indicator,
  pub chain:     Option<LogicChain>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
  pub indicator: Indicator,
  /// `None` when the indicator has no points inside the window.
  pub series:    Option<Series>,
  pub period:    Period,
  pub start:     NaiveDate,
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// All indicators, `importance` descending then `symbol` ascending.
pub async fn indicator_list<S: IndicatorStore>(
  store: &S,
) -> Result<Vec<Indicator>, S::Error> {
  let mut indicators = store.list_indicators().await?;
  sort_for_display(&mut indicators);
  Ok(indicators)
}

async fn require_indicator<S: IndicatorStore>(
  store: &S,
  symbol: &str,
) -> Result<Indicator, QueryError<S::Error>> {
  store
    .get_indicator(symbol)
    .await
    .map_err(QueryError::Store)?
    .ok_or_else(|| QueryError::NotFound(symbol.to_owned()))
}

/// Latest data point and next upcoming event for `symbol`.
///
/// - `as_of`: events dated before this are not "upcoming"; defaults to today
///   (UTC).
pub async fn overview<S: IndicatorStore>(
  store: &S,
  symbol: &str,
  as_of: Option<NaiveDate>,
) -> Result<Overview, QueryError<S::Error>> {
  let indicator = require_indicator(store, symbol).await?;
  let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

  let latest = store
    .latest_data_point(indicator.id)
    .await
    .map_err(QueryError::Store)?;
  let next_event = store
    .next_upcoming_event(indicator.id, as_of)
    .await
    .map_err(QueryError::Store)?;

  Ok(Overview { indicator, latest, next_event })
}

/// The logic chain for `symbol`, with steps in presentation order.
pub async fn logic_chain<S: IndicatorStore>(
  store: &S,
  symbol: &str,
) -> Result<ChainView, QueryError<S::Error>> {
  let indicator = require_indicator(store, symbol).await?;

  let rows = store
    .chain_rows(indicator.id)
    .await
    .map_err(QueryError::Store)?;
  let chain = assemble_chain(indicator.id, rows);

  Ok(ChainView { indicator, chain })
}

/// Series points for `symbol` inside `period`, ending at `as_of` (defaults to
/// today, UTC).
pub async fn historical_series<S: IndicatorStore>(
  store: &S,
  symbol: &str,
  period: Period,
  as_of: Option<NaiveDate>,
) -> Result<HistoricalSeries, QueryError<S::Error>> {
  let indicator = require_indicator(store, symbol).await?;
  let start = period.start_date(as_of.unwrap_or_else(|| Utc::now().date_naive()));

  let points = store
    .history_since(indicator.id, start)
    .await
    .map_err(QueryError::Store)?;
  let series = Series::from_points(indicator.name.clone(), points);

  Ok(HistoricalSeries { indicator, series, period, start })
}
