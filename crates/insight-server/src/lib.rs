//! HTTP server assembly for Macro Insight.
//!
//! Wraps the [`insight_api`] router with the outer concerns the API crate
//! leaves to its caller: the `/api` prefix, a 404 fallback, request tracing,
//! and CORS.

pub mod mock;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use insight_core::store::IndicatorStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// under `INSIGHT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Run the idempotent seed pass before serving.
  pub seed_on_start:   bool,
  /// Allow cross-origin requests from any origin.
  pub cors_permissive: bool,
}

impl ServerConfig {
  /// Load configuration from an optional TOML file plus the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3001)?
      .set_default("store_path", "insight.sqlite")?
      .set_default("seed_on_start", true)?
      .set_default("cors_permissive", true)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("INSIGHT").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: IndicatorStore + 'static,
{
  let app = Router::new()
    .nest("/api", insight_api::api_router(store))
    .fallback(insight_api::not_found)
    .layer(TraceLayer::new_for_http());

  if config.cors_permissive {
    app.layer(CorsLayer::permissive())
  } else {
    app
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
