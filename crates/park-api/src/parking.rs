//! Handlers for `/parking` aggregate endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use park_core::{
  spot::{AvailableSpot, ParkingState},
  store::SpotStore,
};

use crate::error::ApiError;

/// `GET /parking/available` — `[{"id":"A1"}, ...]`; `[]` when nothing is free.
pub async fn available<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<AvailableSpot>>, ApiError>
where
  S: SpotStore,
{
  let spots = store.list_available().await.map_err(ApiError::store)?;
  Ok(Json(spots))
}

/// `GET /parking/state` — `{"total":..,"free":..,"occupied":..}`.
pub async fn state<S>(State(store): State<Arc<S>>) -> Result<Json<ParkingState>, ApiError>
where
  S: SpotStore,
{
  let state = store.aggregate_state().await.map_err(ApiError::store)?;
  Ok(Json(state))
}
