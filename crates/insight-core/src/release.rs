//! Point-in-time releases: observed data points and scheduled future events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::Error;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Expected market impact of a release.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImpactLevel {
  Low,
  Medium,
  High,
}

impl ImpactLevel {
  pub fn parse(s: &str) -> crate::Result<Self> {
    s.parse().map_err(|_| Error::UnknownImpactLevel(s.to_owned()))
  }
}

/// Direction of the actual value relative to the previous release.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeDirection {
  Up,
  Down,
  Stable,
}

impl ChangeDirection {
  pub fn parse(s: &str) -> crate::Result<Self> {
    s.parse()
      .map_err(|_| Error::UnknownChangeDirection(s.to_owned()))
  }
}

// ─── DataPoint ───────────────────────────────────────────────────────────────

/// One historical release of an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
  pub id:               i64,
  pub indicator_id:     i64,
  pub release_date:     NaiveDate,
  pub actual_value:     f64,
  pub expected_value:   Option<f64>,
  pub previous_value:   Option<f64>,
  pub impact_level:     ImpactLevel,
  pub change_direction: ChangeDirection,
  pub change_amount:    f64,
  /// Origin tag set by ingestion tooling; used for selective bulk deletion.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source:           Option<String>,
}

/// Input to [`crate::store::IndicatorStore::record_data_point`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataPoint {
  pub indicator_id:     i64,
  pub release_date:     NaiveDate,
  pub actual_value:     f64,
  pub expected_value:   Option<f64>,
  pub previous_value:   Option<f64>,
  pub impact_level:     ImpactLevel,
  pub change_direction: ChangeDirection,
  pub change_amount:    f64,
  pub source:           Option<String>,
}

// ─── UpcomingEvent ───────────────────────────────────────────────────────────

/// A scheduled future release of an indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
  pub id:             i64,
  pub indicator_id:   i64,
  pub release_date:   NaiveDate,
  pub expected_value: Option<f64>,
  pub importance:     Option<ImpactLevel>,
  pub description:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source:         Option<String>,
}

/// Input to [`crate::store::IndicatorStore::record_upcoming_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUpcomingEvent {
  pub indicator_id:   i64,
  pub release_date:   NaiveDate,
  pub expected_value: Option<f64>,
  pub importance:     Option<ImpactLevel>,
  pub description:    Option<String>,
  pub source:         Option<String>,
}
