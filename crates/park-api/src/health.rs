//! Liveness probe.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:  &'static str,
  pub version: &'static str,
}

/// `GET /health`
pub async fn handler() -> Json<Health> {
  Json(Health { status: "ok", version: env!("CARGO_PKG_VERSION") })
}
