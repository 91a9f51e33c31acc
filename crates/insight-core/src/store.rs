//! The `IndicatorStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `insight-store-sqlite`).
//! The query assembler, the seed loader, and the HTTP layer depend on this
//! abstraction rather than on a concrete backend; a store handle is always
//! passed in explicitly.

use std::future::Future;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  chain::{ChainStepRow, NewLogicStep},
  indicator::{Indicator, NewIndicator},
  release::{DataPoint, NewDataPoint, NewUpcomingEvent, UpcomingEvent},
  series::{HistoryPoint, NewHistoryPoint},
};

/// Per-table row counts for rows carrying a given `source` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
  pub data_points:     u64,
  pub upcoming_events: u64,
  pub history_points:  u64,
}

impl SourceCounts {
  pub fn total(&self) -> u64 {
    self.data_points + self.upcoming_events + self.history_points
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Macro Insight store backend.
///
/// Reads never fail because related rows are missing; absence is reported as
/// `None` or an empty `Vec`. Writes that reference a missing indicator fail
/// without affecting other rows.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait IndicatorStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Indicators ────────────────────────────────────────────────────────

  /// All indicators, in storage order.
  fn list_indicators(
    &self,
  ) -> impl Future<Output = Result<Vec<Indicator>, Self::Error>> + Send + '_;

  /// Look up an indicator by its unique symbol.
  fn get_indicator<'a>(
    &'a self,
    symbol: &'a str,
  ) -> impl Future<Output = Result<Option<Indicator>, Self::Error>> + Send + 'a;

  /// Insert an indicator unless one with the same symbol already exists.
  /// Returns `true` if a row was inserted. Existing rows are never modified.
  fn insert_indicator_if_absent(
    &self,
    input: NewIndicator,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Logic chains ──────────────────────────────────────────────────────

  /// All chain rows for an indicator, left-joined against their steps.
  fn chain_rows(
    &self,
    indicator_id: i64,
  ) -> impl Future<Output = Result<Vec<ChainStepRow>, Self::Error>> + Send + '_;

  /// Create a chain with `steps` for `indicator_id` unless the indicator
  /// already has one. Returns the new chain id, or `None` if a chain was
  /// already present. The check and the inserts happen atomically.
  fn insert_chain_if_absent(
    &self,
    indicator_id: i64,
    steps: Vec<NewLogicStep>,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + '_;

  // ── Releases ──────────────────────────────────────────────────────────

  /// The most recent data point by `release_date`.
  fn latest_data_point(
    &self,
    indicator_id: i64,
  ) -> impl Future<Output = Result<Option<DataPoint>, Self::Error>> + Send + '_;

  /// The earliest upcoming event on or after `from`.
  fn next_upcoming_event(
    &self,
    indicator_id: i64,
    from: NaiveDate,
  ) -> impl Future<Output = Result<Option<UpcomingEvent>, Self::Error>> + Send + '_;

  /// Series points with `date >= start`, ascending by date.
  fn history_since(
    &self,
    indicator_id: i64,
    start: NaiveDate,
  ) -> impl Future<Output = Result<Vec<HistoryPoint>, Self::Error>> + Send + '_;

  // ── Ingestion ─────────────────────────────────────────────────────────

  fn record_data_point(
    &self,
    input: NewDataPoint,
  ) -> impl Future<Output = Result<DataPoint, Self::Error>> + Send + '_;

  fn record_upcoming_event(
    &self,
    input: NewUpcomingEvent,
  ) -> impl Future<Output = Result<UpcomingEvent, Self::Error>> + Send + '_;

  fn record_history_point(
    &self,
    input: NewHistoryPoint,
  ) -> impl Future<Output = Result<HistoryPoint, Self::Error>> + Send + '_;

  /// Delete every ingested row tagged with `source`; returns what was removed.
  fn delete_by_source<'a>(
    &'a self,
    source: &'a str,
  ) -> impl Future<Output = Result<SourceCounts, Self::Error>> + Send + 'a;

  /// Count ingested rows tagged with `source`.
  fn count_by_source<'a>(
    &'a self,
    source: &'a str,
  ) -> impl Future<Output = Result<SourceCounts, Self::Error>> + Send + 'a;
}
