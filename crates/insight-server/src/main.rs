//! Macro Insight server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, seeds reference data, and serves the JSON API over HTTP.
//!
//! # Mock data
//!
//! ```text
//! cargo run -p insight-server -- mock reset --file data/mock-data.json
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use insight_core::{catalog::Catalog, seed::seed};
use insight_server::{ServerConfig, expand_tilde, mock::MockAction};
use insight_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Macro Insight API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Run the seed pass and exit.
  Seed,
  /// Manage rows tagged as mock test data.
  Mock {
    /// Dataset file used by `import` and `reset`.
    #[arg(long, global = true, default_value = "data/mock-data.json")]
    file: PathBuf,

    #[command(subcommand)]
    action: MockAction,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => {
      if server_cfg.seed_on_start {
        seed(&store, &Catalog::canonical()).await;
      }

      let app = insight_server::app(Arc::new(store), &server_cfg);
      let address = server_cfg.address();

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
    }
    Command::Seed => {
      let report = seed(&store, &Catalog::canonical()).await;
      println!("{}", serde_json::to_string_pretty(&report)?);
      if !report.is_clean() {
        anyhow::bail!("seed pass finished with skipped or failed rows");
      }
    }
    Command::Mock { file, action } => {
      insight_server::mock::run(&store, action, &file).await?;
    }
  }

  Ok(())
}
