//! Logic chains: ordered cause→effect narratives attached to an indicator.
//!
//! The store returns chain/step rows flat (one row per step, joined against
//! the chain); [`assemble_chain`] groups them back into a single
//! [`LogicChain`].

use serde::{Deserialize, Serialize};

/// One step of a logic chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicStep {
  pub id:              i64,
  /// Presentation sequence within the chain; preserved exactly as seeded.
  pub step_order:      i32,
  pub title:           String,
  pub description:     String,
  pub explanation:     Option<String>,
  pub analogy:         Option<String>,
  pub historical_case: Option<String>,
}

/// Input for one step when creating a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogicStep {
  pub step_order:      i32,
  pub title:           String,
  pub description:     String,
  pub explanation:     Option<String>,
  pub analogy:         Option<String>,
  pub historical_case: Option<String>,
}

/// A chain with its steps sorted by `step_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicChain {
  pub id:           i64,
  pub indicator_id: i64,
  pub steps:        Vec<LogicStep>,
}

/// A chain row left-joined against its steps. `step` is `None` for a chain
/// that has no steps yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStepRow {
  pub chain_id: i64,
  pub step:     Option<LogicStep>,
}

/// Group flat rows into a single chain.
///
/// When rows from several chains are present, only the chain with the lowest
/// id is kept; steps are never merged across chains. Steps sort by
/// `step_order`, ties broken by step id.
pub fn assemble_chain(
  indicator_id: i64,
  rows: Vec<ChainStepRow>,
) -> Option<LogicChain> {
  let chain_id = rows.iter().map(|r| r.chain_id).min()?;

  let mut steps: Vec<LogicStep> = rows
    .into_iter()
    .filter(|r| r.chain_id == chain_id)
    .filter_map(|r| r.step)
    .collect();
  steps.sort_by_key(|s| (s.step_order, s.id));

  Some(LogicChain { id: chain_id, indicator_id, steps })
}
