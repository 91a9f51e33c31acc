//! Handler for `GET /logic-chain/{symbol}`.

use std::sync::Arc;

use axum::extract::{Path, State};
use insight_core::{chain::LogicStep, indicator::Indicator, query, store::IndicatorStore};
use serde::Serialize;

use crate::{envelope::Envelope, error::ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBody {
  pub id:           i64,
  /// The indicator symbol, not its numeric id.
  pub indicator_id: String,
  pub steps:        Vec<LogicStep>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicChainBody {
  pub indicator:   Indicator,
  pub logic_chain: Option<ChainBody>,
}

/// `GET /logic-chain/{symbol}`. `logicChain` is `null` when none exists.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Path(symbol): Path<String>,
) -> Result<Envelope<LogicChainBody>, ApiError>
where
  S: IndicatorStore,
{
  let view = query::logic_chain(store.as_ref(), &symbol).await?;

  let logic_chain = view.chain.map(|c| ChainBody {
    id:           c.id,
    indicator_id: view.indicator.symbol.clone(),
    steps:        c.steps,
  });

  Ok(Envelope::ok(
    LogicChainBody { indicator: view.indicator, logic_chain },
    "Logic chain retrieved successfully",
  ))
}
