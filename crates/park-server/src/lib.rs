//! Process wiring for the parking state server: configuration and the
//! top-level router with request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use park_core::store::{BarrierStore, SpotStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Port used when neither the config file, `PARKING_PORT`, nor `PORT` set one.
pub const DEFAULT_PORT: i64 = 3000;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults (with `PORT` from the
/// environment standing in for the default port), the optional TOML file,
/// then `PARKING_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_port(file, std::env::var("PORT").ok())
  }

  /// Like [`ServerConfig::load`], with the `PORT` fallback passed explicitly.
  pub fn load_with_port(
    file: &Path,
    port_env: Option<String>,
  ) -> Result<Self, config::ConfigError> {
    let builder = config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("store_path", "parking.db")?;
    let builder = match port_env {
      Some(port) => builder.set_default("port", port)?,
      None => builder.set_default("port", DEFAULT_PORT)?,
    };

    builder
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("PARKING"))
      .build()?
      .try_deserialize()
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

/// The API router wrapped in HTTP request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: SpotStore + BarrierStore + 'static,
{
  park_api::api_router(store).layer(TraceLayer::new_for_http())
}
