//! The repository traits implemented by storage backends.
//!
//! Backends (e.g. `park-store-sqlite`) implement [`SpotStore`] and
//! [`BarrierStore`]. The HTTP layer depends on these traits, never on a
//! concrete backend, and receives the store as an explicit handle.

use std::future::Future;

use crate::{
  barrier::{Barrier, BarrierState},
  spot::{AvailableSpot, NewSpot, ParkingState, Spot, SpotStatus, StatusChange},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Implemented by backend error types so callers can tell domain outcomes
/// (not found, already exists) apart from genuine storage faults without
/// inspecting error text.
pub trait StoreError: std::error::Error + Send + Sync + Sized + 'static {
  /// Returns the domain error this failure represents, or `self` unchanged
  /// when it is a storage fault.
  fn into_domain(self) -> Result<crate::Error, Self>;
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Shared by every repository trait so a backend has one error type.
pub trait Store: Send + Sync {
  type Error: StoreError;
}

/// CRUD and aggregate queries over parking spots.
///
/// Every method is a single statement against the backend; atomicity comes
/// from the backend alone.
pub trait SpotStore: Store {
  /// Insert a spot with status `FREE` and a fresh timestamp.
  ///
  /// Fails with [`Error::AlreadyExists`](crate::Error::AlreadyExists) when
  /// the id is taken; the existing row is left untouched.
  fn create_spot(
    &self,
    input: NewSpot,
  ) -> impl Future<Output = Result<Spot, Self::Error>> + Send + '_;

  /// All spots, ordered by id ascending.
  fn list_spots(&self) -> impl Future<Output = Result<Vec<Spot>, Self::Error>> + Send + '_;

  /// Returns `None` if no spot has this id.
  fn get_spot<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Spot>, Self::Error>> + Send + 'a;

  /// Returns `None` if no spot has this id.
  fn get_spot_status<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<SpotStatus>, Self::Error>> + Send + 'a;

  /// Overwrite `status` and `updated_at` in one statement.
  ///
  /// Fails with [`Error::NotFound`](crate::Error::NotFound) when no row
  /// matched.
  fn set_spot_status<'a>(
    &'a self,
    id: &'a str,
    status: SpotStatus,
  ) -> impl Future<Output = Result<StatusChange, Self::Error>> + Send + 'a;

  /// Ids of every `FREE` spot, ordered by id. Empty when none are free.
  fn list_available(
    &self,
  ) -> impl Future<Output = Result<Vec<AvailableSpot>, Self::Error>> + Send + '_;

  /// `{total, free, occupied}` computed in a single pass; all zero when
  /// there are no spots.
  fn aggregate_state(
    &self,
  ) -> impl Future<Output = Result<ParkingState, Self::Error>> + Send + '_;
}

/// Upsert and read over barriers.
pub trait BarrierStore: Store {
  /// Returns `None` if the barrier has never been written.
  fn get_barrier<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Barrier>, Self::Error>> + Send + 'a;

  /// Idempotent upsert: creates the row on first write, otherwise overwrites
  /// `state` and `updated_at`. Concurrent writers resolve last-write-wins.
  fn set_barrier_state<'a>(
    &'a self,
    id: &'a str,
    state: BarrierState,
  ) -> impl Future<Output = Result<Barrier, Self::Error>> + Send + 'a;

  fn open_barrier<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Barrier, Self::Error>> + Send + 'a {
    self.set_barrier_state(id, BarrierState::Opened)
  }

  fn close_barrier<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Barrier, Self::Error>> + Send + 'a {
    self.set_barrier_state(id, BarrierState::Closed)
  }
}
