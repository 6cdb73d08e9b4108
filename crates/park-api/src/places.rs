//! Handlers for `/places` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/places` | Body: `{"id":"A1","label":"..."}`; returns 201 |
//! | `GET`  | `/places` | All spots, ordered by id |
//! | `GET`  | `/places/:id` | 404 if not found |
//! | `GET`  | `/places/:id/status` | `{"status":"FREE"}` |
//! | `PUT`  | `/places/:id/status` | Body: `{"status":"OCCUPIED"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use park_core::{
  Entity, Error, Field,
  spot::{NewSpot, Spot, SpotStatus, StatusChange},
  store::SpotStore,
};
use serde::Serialize;
use serde_json::Value;

use crate::{body, error::ApiError};

// ─── Create ───────────────────────────────────────────────────────────────────

/// Response body of `POST /places`.
#[derive(Debug, Serialize)]
pub struct CreatedSpot {
  pub id:     String,
  pub label:  String,
  pub status: SpotStatus,
}

impl From<Spot> for CreatedSpot {
  fn from(spot: Spot) -> Self {
    CreatedSpot { id: spot.id, label: spot.label, status: spot.status }
  }
}

/// `POST /places` — body: `{"id":"A1"}` or `{"id":"A1","label":"North 1"}`.
///
/// `label` may be omitted or `null`, in which case it defaults to `id`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  raw: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: SpotStore,
{
  let fields = body::object(&raw);

  let id = body::str_field(&fields, "id")
    .ok_or_else(|| Error::invalid(Field::Id, "id is required (string)"))?;
  let label = match fields.get("label") {
    None | Some(Value::Null) => None,
    Some(Value::String(label)) => Some(label.clone()),
    Some(_) => return Err(Error::invalid(Field::Label, "label must be a string").into()),
  };

  let spot = store
    .create_spot(NewSpot::new(id, label)?)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(id = %spot.id, label = %spot.label, "spot created");

  Ok((StatusCode::CREATED, Json(CreatedSpot::from(spot))))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /places`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Spot>>, ApiError>
where
  S: SpotStore,
{
  let spots = store.list_spots().await.map_err(ApiError::store)?;
  Ok(Json(spots))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /places/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Spot>, ApiError>
where
  S: SpotStore,
{
  let spot = store
    .get_spot(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| Error::not_found(Entity::Spot, &id))?;
  Ok(Json(spot))
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusView {
  pub status: SpotStatus,
}

/// `GET /places/:id/status`
pub async fn get_status<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<StatusView>, ApiError>
where
  S: SpotStore,
{
  let status = store
    .get_spot_status(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| Error::not_found(Entity::Spot, &id))?;
  Ok(Json(StatusView { status }))
}

/// `PUT /places/:id/status` — body: `{"status":"FREE"|"OCCUPIED"}`.
///
/// The status is validated before the store is touched, so an invalid value
/// is a 400 whether or not the spot exists.
pub async fn set_status<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  raw: Bytes,
) -> Result<Json<StatusChange>, ApiError>
where
  S: SpotStore,
{
  let fields = body::object(&raw);
  let status = SpotStatus::parse(body::str_field(&fields, "status").unwrap_or_default())?;

  let change = store
    .set_spot_status(&id, status)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(id = %change.id, status = change.status.as_str(), "spot status updated");

  Ok(Json(change))
}
