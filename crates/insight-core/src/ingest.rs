//! Bulk ingestion of externally supplied release data.
//!
//! A [`Dataset`] references indicators by symbol; symbols are resolved to
//! numeric ids here, at the boundary. Every ingested row is tagged with a
//! `source` so a whole import can later be counted or removed in one call.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  release::{ChangeDirection, ImpactLevel, NewDataPoint, NewUpcomingEvent},
  series::NewHistoryPoint,
  store::{IndicatorStore, SourceCounts},
};

/// Source tag used by the mock-data lifecycle tooling.
pub const MOCK_SOURCE: &str = "MOCK_TEST_DATA";

// ─── Dataset format ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
  #[serde(default)]
  pub data_points:     Vec<DatasetDataPoint>,
  #[serde(default)]
  pub upcoming_events: Vec<DatasetEvent>,
  #[serde(default)]
  pub historical_data: Vec<DatasetHistoryPoint>,
}

impl Dataset {
  pub fn from_json(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDataPoint {
  /// Indicator symbol.
  pub indicator_id:     String,
  pub release_date:     NaiveDate,
  pub actual_value:     f64,
  pub expected_value:   Option<f64>,
  pub previous_value:   Option<f64>,
  pub impact_level:     ImpactLevel,
  pub change_direction: ChangeDirection,
  pub change_amount:    f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEvent {
  pub indicator_id:   String,
  pub release_date:   NaiveDate,
  pub expected_value: Option<f64>,
  pub importance:     Option<ImpactLevel>,
  pub description:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetHistoryPoint {
  pub indicator_id: String,
  pub date:         NaiveDate,
  pub value:        f64,
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub imported: SourceCounts,
  /// Rows skipped because their symbol is unknown, as `"<kind> <symbol>"`.
  pub skipped:  Vec<String>,
}

/// Memoised symbol → id lookups for one import.
struct Resolver<'s, S> {
  store: &'s S,
  cache: HashMap<String, Option<i64>>,
}

impl<'s, S: IndicatorStore> Resolver<'s, S> {
  async fn id(&mut self, symbol: &str) -> Result<Option<i64>, S::Error> {
    if let Some(id) = self.cache.get(symbol) {
      return Ok(*id);
    }
    let id = self.store.get_indicator(symbol).await?.map(|i| i.id);
    self.cache.insert(symbol.to_owned(), id);
    Ok(id)
  }
}

/// Write every row of `dataset` tagged with `source`. Rows naming an unknown
/// indicator are skipped; a store failure stops the import.
pub async fn import_dataset<S: IndicatorStore>(
  store: &S,
  dataset: &Dataset,
  source: &str,
) -> Result<ImportReport, S::Error> {
  let mut report = ImportReport::default();
  let mut resolver = Resolver { store, cache: HashMap::new() };
  let tag = Some(source.to_owned());

  for row in &dataset.data_points {
    let Some(indicator_id) = resolver.id(&row.indicator_id).await? else {
      tracing::warn!(symbol = %row.indicator_id, "unknown indicator, skipping data point");
      report.skipped.push(format!("data_point {}", row.indicator_id));
      continue;
    };
    store
      .record_data_point(NewDataPoint {
        indicator_id,
        release_date: row.release_date,
        actual_value: row.actual_value,
        expected_value: row.expected_value,
        previous_value: row.previous_value,
        impact_level: row.impact_level,
        change_direction: row.change_direction,
        change_amount: row.change_amount,
        source: tag.clone(),
      })
      .await?;
    report.imported.data_points += 1;
  }

  for row in &dataset.upcoming_events {
    let Some(indicator_id) = resolver.id(&row.indicator_id).await? else {
      tracing::warn!(symbol = %row.indicator_id, "unknown indicator, skipping event");
      report.skipped.push(format!("upcoming_event {}", row.indicator_id));
      continue;
    };
    store
      .record_upcoming_event(NewUpcomingEvent {
        indicator_id,
        release_date: row.release_date,
        expected_value: row.expected_value,
        importance: row.importance,
        description: row.description.clone(),
        source: tag.clone(),
      })
      .await?;
    report.imported.upcoming_events += 1;
  }

  for row in &dataset.historical_data {
    let Some(indicator_id) = resolver.id(&row.indicator_id).await? else {
      tracing::warn!(symbol = %row.indicator_id, "unknown indicator, skipping history point");
      report.skipped.push(format!("history_point {}", row.indicator_id));
      continue;
    };
    store
      .record_history_point(NewHistoryPoint {
        indicator_id,
        date: row.date,
        value: row.value,
        source: tag.clone(),
      })
      .await?;
    report.imported.history_points += 1;
  }

  tracing::info!(
    source,
    imported = report.imported.total(),
    skipped = report.skipped.len(),
    "dataset import complete"
  );
  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dataset_parses_camel_case_and_missing_sections() {
    let json = r#"{
      "dataPoints": [{
        "indicatorId": "PCE",
        "releaseDate": "2024-03-29",
        "actualValue": 2.8,
        "expectedValue": 2.7,
        "previousValue": 2.6,
        "impactLevel": "high",
        "changeDirection": "up",
        "changeAmount": 0.2
      }]
    }"#;
    let ds = Dataset::from_json(json).unwrap();
    assert_eq!(ds.data_points.len(), 1);
    assert!(ds.upcoming_events.is_empty());
    assert!(ds.historical_data.is_empty());

    let dp = &ds.data_points[0];
    assert_eq!(dp.indicator_id, "PCE");
    assert_eq!(dp.impact_level, ImpactLevel::High);
    assert_eq!(dp.change_direction, ChangeDirection::Up);
    assert_eq!(dp.release_date, NaiveDate::from_ymd_opt(2024, 3, 29).unwrap());
  }

  #[test]
  fn dataset_rejects_unknown_enum_text() {
    let json = r#"{
      "upcomingEvents": [{
        "indicatorId": "CPI",
        "releaseDate": "2024-04-10",
        "importance": "critical"
      }]
    }"#;
    assert!(Dataset::from_json(json).is_err());
  }
}
