//! Idempotent seeding of reference data.
//!
//! Indicators are inserted only if their symbol is absent; chains only if the
//! parent indicator exists and has no chain yet. Running [`seed`] any number
//! of times leaves the store in the same state as running it once. A bad row
//! is logged and recorded in the [`SeedReport`]; it never aborts the pass.

use serde::Serialize;

use crate::{catalog::Catalog, store::IndicatorStore};

/// Outcome of one seed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
  pub indicators_inserted: usize,
  pub indicators_present:  usize,
  pub chains_inserted:     usize,
  pub chains_present:      usize,
  /// Symbols whose chain was skipped because the indicator does not exist.
  pub skipped_chains:      Vec<String>,
  /// Rows whose write failed, as `"<kind> <symbol>: <error>"`.
  pub failures:            Vec<String>,
}

impl SeedReport {
  pub fn is_clean(&self) -> bool {
    self.skipped_chains.is_empty() && self.failures.is_empty()
  }
}

/// Load `catalog` into `store`.
pub async fn seed<S: IndicatorStore>(store: &S, catalog: &Catalog) -> SeedReport {
  let mut report = SeedReport::default();

  for input in &catalog.indicators {
    match store.insert_indicator_if_absent(input.clone()).await {
      Ok(true) => report.indicators_inserted += 1,
      Ok(false) => report.indicators_present += 1,
      Err(e) => {
        tracing::warn!(symbol = %input.symbol, error = %e, "failed to seed indicator");
        report.failures.push(format!("indicator {}: {e}", input.symbol));
      }
    }
  }

  for chain in &catalog.chains {
    // The parent must be confirmed before the chain write is attempted.
    let indicator = match store.get_indicator(&chain.symbol).await {
      Ok(Some(i)) => i,
      Ok(None) => {
        tracing::warn!(symbol = %chain.symbol, "indicator missing, skipping logic chain");
        report.skipped_chains.push(chain.symbol.clone());
        continue;
      }
      Err(e) => {
        tracing::warn!(symbol = %chain.symbol, error = %e, "failed to look up indicator");
        report.failures.push(format!("chain {}: {e}", chain.symbol));
        continue;
      }
    };

    match store
      .insert_chain_if_absent(indicator.id, chain.steps.clone())
      .await
    {
      Ok(Some(chain_id)) => {
        tracing::debug!(symbol = %chain.symbol, chain_id, "logic chain inserted");
        report.chains_inserted += 1;
      }
      Ok(None) => report.chains_present += 1,
      Err(e) => {
        tracing::warn!(symbol = %chain.symbol, error = %e, "failed to seed logic chain");
        report.failures.push(format!("chain {}: {e}", chain.symbol));
      }
    }
  }

  tracing::info!(
    indicators_inserted = report.indicators_inserted,
    chains_inserted = report.chains_inserted,
    skipped = report.skipped_chains.len(),
    failed = report.failures.len(),
    "seed pass complete"
  );
  report
}
