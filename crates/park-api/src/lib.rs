//! JSON REST API for the parking state service.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`SpotStore`] and [`BarrierStore`]. Each endpoint makes exactly one store
//! call; no state is held between requests.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = park_api::api_router(Arc::new(store));
//! ```

pub mod barriers;
pub mod error;
pub mod health;
pub mod parking;
pub mod places;

mod body;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use park_core::store::{BarrierStore, SpotStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SpotStore + BarrierStore + 'static,
{
  Router::new()
    // Spots
    .route("/places", get(places::list::<S>).post(places::create::<S>))
    .route("/places/{id}", get(places::get_one::<S>))
    .route(
      "/places/{id}/status",
      get(places::get_status::<S>).put(places::set_status::<S>),
    )
    // Aggregates
    .route("/parking/available", get(parking::available::<S>))
    .route("/parking/state", get(parking::state::<S>))
    // Barriers
    .route("/barrier/{id}", get(barriers::get_one::<S>))
    .route("/barrier/{id}/open", post(barriers::open::<S>))
    .route("/barrier/{id}/close", post(barriers::close::<S>))
    .route("/barrier/{id}/state", put(barriers::set_state::<S>))
    // Probe
    .route("/health", get(health::handler))
    .with_state(store)
}

#[cfg(test)]
mod tests;
