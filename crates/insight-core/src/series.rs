//! Historical time-series points and the labelled series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One stored observation in the `historical_data` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
  pub id:           i64,
  pub indicator_id: i64,
  pub date:         NaiveDate,
  pub value:        f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source:       Option<String>,
}

/// Input to [`crate::store::IndicatorStore::record_history_point`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryPoint {
  pub indicator_id: i64,
  pub date:         NaiveDate,
  pub value:        f64,
  pub source:       Option<String>,
}

/// A labelled, date-ascending series ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
  /// Display label; the indicator's name.
  pub label:  String,
  pub points: Vec<(NaiveDate, f64)>,
}

impl Series {
  /// Build a series from stored points, or `None` when there are none.
  /// Points are re-sorted by date (stable) so the result is always ascending.
  pub fn from_points(
    label: impl Into<String>,
    mut points: Vec<HistoryPoint>,
  ) -> Option<Self> {
    if points.is_empty() {
      return None;
    }
    points.sort_by_key(|p| p.date);
    Some(Self {
      label:  label.into(),
      points: points.into_iter().map(|p| (p.date, p.value)).collect(),
    })
  }

  pub fn labels(&self) -> impl Iterator<Item = NaiveDate> + '_ {
    self.points.iter().map(|(d, _)| *d)
  }

  pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
    self.points.iter().map(|(_, v)| *v)
  }
}
