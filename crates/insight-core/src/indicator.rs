//! The indicator, the reference record every other entity hangs off.
//!
//! Indicators are created once at seed time and never change afterwards.
//! External callers only ever address them by `symbol`; the numeric `id` is a
//! storage detail used for foreign keys.

use serde::{Deserialize, Serialize};

/// A named macroeconomic series, e.g. an inflation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
  pub id:          i64,
  /// Globally unique, stable external key (e.g. `"PCE"`).
  pub symbol:      String,
  pub name:        String,
  pub category:    String,
  /// Integer rank; higher is more important.
  pub importance:  i32,
  pub description: Option<String>,
}

/// Input to [`crate::store::IndicatorStore::insert_indicator_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIndicator {
  pub symbol:      String,
  pub name:        String,
  pub category:    String,
  pub importance:  i32,
  pub description: Option<String>,
}

/// Order indicators for presentation: `importance` descending, then `symbol`
/// ascending. The sort is stable, so fully-equal keys keep their input order.
pub fn sort_for_display(indicators: &mut [Indicator]) {
  indicators.sort_by(|a, b| {
    b.importance
      .cmp(&a.importance)
      .then_with(|| a.symbol.cmp(&b.symbol))
  });
}
