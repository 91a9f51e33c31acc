//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD`, which sorts and compares
//! correctly as text. Enumerations are stored as their lowercase names.

use chrono::NaiveDate;
use insight_core::{
  release::{ChangeDirection, DataPoint, ImpactLevel, UpcomingEvent},
  series::HistoryPoint,
};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `data_points` row.
pub struct RawDataPoint {
  pub id:               i64,
  pub indicator_id:     i64,
  pub release_date:     String,
  pub actual_value:     f64,
  pub expected_value:   Option<f64>,
  pub previous_value:   Option<f64>,
  pub impact_level:     String,
  pub change_direction: String,
  pub change_amount:    f64,
  pub source:           Option<String>,
}

pub const DATA_POINT_COLUMNS: &str = "id, indicator_id, release_date, actual_value, \
   expected_value, previous_value, impact_level, change_direction, change_amount, source";

impl RawDataPoint {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      indicator_id:     row.get(1)?,
      release_date:     row.get(2)?,
      actual_value:     row.get(3)?,
      expected_value:   row.get(4)?,
      previous_value:   row.get(5)?,
      impact_level:     row.get(6)?,
      change_direction: row.get(7)?,
      change_amount:    row.get(8)?,
      source:           row.get(9)?,
    })
  }

  pub fn into_data_point(self) -> Result<DataPoint> {
    Ok(DataPoint {
      id:               self.id,
      indicator_id:     self.indicator_id,
      release_date:     decode_date(&self.release_date)?,
      actual_value:     self.actual_value,
      expected_value:   self.expected_value,
      previous_value:   self.previous_value,
      impact_level:     ImpactLevel::parse(&self.impact_level)?,
      change_direction: ChangeDirection::parse(&self.change_direction)?,
      change_amount:    self.change_amount,
      source:           self.source,
    })
  }
}

/// Raw values read directly from an `upcoming_events` row.
pub struct RawUpcomingEvent {
  pub id:             i64,
  pub indicator_id:   i64,
  pub release_date:   String,
  pub expected_value: Option<f64>,
  pub importance:     Option<String>,
  pub description:    Option<String>,
  pub source:         Option<String>,
}

pub const UPCOMING_EVENT_COLUMNS: &str =
  "id, indicator_id, release_date, expected_value, importance, description, source";

impl RawUpcomingEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      indicator_id:   row.get(1)?,
      release_date:   row.get(2)?,
      expected_value: row.get(3)?,
      importance:     row.get(4)?,
      description:    row.get(5)?,
      source:         row.get(6)?,
    })
  }

  pub fn into_event(self) -> Result<UpcomingEvent> {
    Ok(UpcomingEvent {
      id:             self.id,
      indicator_id:   self.indicator_id,
      release_date:   decode_date(&self.release_date)?,
      expected_value: self.expected_value,
      importance:     self
        .importance
        .as_deref()
        .map(ImpactLevel::parse)
        .transpose()?,
      description:    self.description,
      source:         self.source,
    })
  }
}

/// Raw values read directly from a `historical_data` row.
pub struct RawHistoryPoint {
  pub id:           i64,
  pub indicator_id: i64,
  pub date:         String,
  pub value:        f64,
  pub source:       Option<String>,
}

impl RawHistoryPoint {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      indicator_id: row.get(1)?,
      date:         row.get(2)?,
      value:        row.get(3)?,
      source:       row.get(4)?,
    })
  }

  pub fn into_point(self) -> Result<HistoryPoint> {
    Ok(HistoryPoint {
      id:           self.id,
      indicator_id: self.indicator_id,
      date:         decode_date(&self.date)?,
      value:        self.value,
      source:       self.source,
    })
  }
}
