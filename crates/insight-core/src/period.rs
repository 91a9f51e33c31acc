//! Period resolution for history queries.
//!
//! A period token (`"12m"` or `"3y"`) maps to an inclusive lower bound on the
//! series date, computed from a caller-supplied reference date. Resolution is
//! a pure function of `(token, today)`; nothing is cached between calls.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// The closed set of supported history windows.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  AsRefStr,
  Display,
  EnumString,
)]
pub enum Period {
  /// The last 12 calendar months.
  #[default]
  #[serde(rename = "12m")]
  #[strum(serialize = "12m")]
  TwelveMonths,
  /// The last 3 calendar years.
  #[serde(rename = "3y")]
  #[strum(serialize = "3y")]
  ThreeYears,
}

impl Period {
  /// Resolve an optional request token. Absent or unrecognised tokens fall
  /// back to [`Period::TwelveMonths`]; this never fails.
  pub fn from_token(token: Option<&str>) -> Self {
    token.and_then(|t| t.parse().ok()).unwrap_or_default()
  }

  /// Length of the window in calendar months.
  pub fn months(self) -> u32 {
    match self {
      Self::TwelveMonths => 12,
      Self::ThreeYears => 36,
    }
  }

  /// Inclusive start date of the window ending at `today`.
  ///
  /// Month arithmetic clamps to the last valid day, so 2024-02-29 minus
  /// 12 months is 2023-02-28.
  pub fn start_date(self, today: NaiveDate) -> NaiveDate {
    today
      .checked_sub_months(Months::new(self.months()))
      .unwrap_or(NaiveDate::MIN)
  }
}
