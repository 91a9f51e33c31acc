//! Lifecycle tooling for mock release data.
//!
//! Every row written here carries the [`MOCK_SOURCE`] tag, so it can be
//! removed again without touching reference data or real ingested rows.

use std::path::Path;

use anyhow::Context as _;
use clap::Subcommand;
use insight_core::{
  ingest::{Dataset, ImportReport, MOCK_SOURCE, import_dataset},
  store::{IndicatorStore, SourceCounts},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum MockAction {
  /// Insert every row of the dataset file.
  Import,
  /// Delete every mock-tagged row.
  Delete,
  /// Delete, then import.
  Reset,
  /// Print mock-tagged row counts per table.
  Status,
}

pub fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read dataset {path:?}"))?;
  Dataset::from_json(&text).with_context(|| format!("failed to parse dataset {path:?}"))
}

/// Replace all mock rows with the contents of `dataset`.
pub async fn reset<S: IndicatorStore>(
  store: &S,
  dataset: &Dataset,
) -> Result<(SourceCounts, ImportReport), S::Error> {
  let removed = store.delete_by_source(MOCK_SOURCE).await?;
  let report = import_dataset(store, dataset, MOCK_SOURCE).await?;
  Ok((removed, report))
}

fn print_counts(heading: &str, counts: &SourceCounts) {
  println!("{heading}");
  println!("- data points:     {}", counts.data_points);
  println!("- upcoming events: {}", counts.upcoming_events);
  println!("- history points:  {}", counts.history_points);
}

fn print_import(report: &ImportReport) {
  print_counts("imported:", &report.imported);
  for skipped in &report.skipped {
    println!("skipped (unknown indicator): {skipped}");
  }
}

/// Execute `action` against `store`, reading the dataset from `file` when the
/// action needs one.
pub async fn run<S: IndicatorStore>(
  store: &S,
  action: MockAction,
  file: &Path,
) -> anyhow::Result<()> {
  match action {
    MockAction::Import => {
      let dataset = load_dataset(file)?;
      let report = import_dataset(store, &dataset, MOCK_SOURCE).await?;
      print_import(&report);
    }
    MockAction::Delete => {
      let removed = store.delete_by_source(MOCK_SOURCE).await?;
      print_counts("deleted:", &removed);
    }
    MockAction::Reset => {
      let dataset = load_dataset(file)?;
      let (removed, report) = reset(store, &dataset).await?;
      print_counts("deleted:", &removed);
      print_import(&report);
    }
    MockAction::Status => {
      let counts = store.count_by_source(MOCK_SOURCE).await?;
      print_counts("mock rows:", &counts);
    }
  }
  Ok(())
}
