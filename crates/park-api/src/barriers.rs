//! Handlers for `/barrier` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/barrier/:id` | 404 until the first write |
//! | `POST` | `/barrier/:id/open` | Upserts `OPENED` |
//! | `POST` | `/barrier/:id/close` | Upserts `CLOSED` |
//! | `PUT`  | `/barrier/:id/state` | Body: `{"state":"OPENED"\|"CLOSED"}` |
//!
//! The state field is named `state` in every response.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use bytes::Bytes;
use park_core::{
  Entity, Error,
  barrier::{Barrier, BarrierState},
  store::BarrierStore,
};
use serde::Serialize;

use crate::{body, error::ApiError};

/// Acknowledgement returned by every barrier write.
#[derive(Debug, Serialize)]
pub struct BarrierAck {
  pub ok:      bool,
  #[serde(flatten)]
  pub barrier: Barrier,
}

impl From<Barrier> for BarrierAck {
  fn from(barrier: Barrier) -> Self { BarrierAck { ok: true, barrier } }
}

/// `GET /barrier/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Barrier>, ApiError>
where
  S: BarrierStore,
{
  let barrier = store
    .get_barrier(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| Error::not_found(Entity::Barrier, &id))?;
  Ok(Json(barrier))
}

/// `POST /barrier/:id/open`
pub async fn open<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<BarrierAck>, ApiError>
where
  S: BarrierStore,
{
  let barrier = store.open_barrier(&id).await.map_err(ApiError::store)?;
  tracing::debug!(id = %barrier.id, "barrier opened");
  Ok(Json(barrier.into()))
}

/// `POST /barrier/:id/close`
pub async fn close<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<BarrierAck>, ApiError>
where
  S: BarrierStore,
{
  let barrier = store.close_barrier(&id).await.map_err(ApiError::store)?;
  tracing::debug!(id = %barrier.id, "barrier closed");
  Ok(Json(barrier.into()))
}

/// `PUT /barrier/:id/state` — state reports forwarded from gate controllers.
pub async fn set_state<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  raw: Bytes,
) -> Result<Json<BarrierAck>, ApiError>
where
  S: BarrierStore,
{
  let fields = body::object(&raw);
  let state = BarrierState::parse(body::str_field(&fields, "state").unwrap_or_default())?;

  let barrier = store
    .set_barrier_state(&id, state)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(id = %barrier.id, state = barrier.state.as_str(), "barrier state set");

  Ok(Json(barrier.into()))
}
