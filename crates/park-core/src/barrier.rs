//! Access barriers.
//!
//! A barrier has no state until the first open/close command; the row is
//! created lazily by [`BarrierStore::set_barrier_state`](crate::store::BarrierStore::set_barrier_state).
//! There is no transition graph: either state may follow either state.

use serde::{Deserialize, Serialize};

use crate::{Error, Field, Result, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarrierState {
  Opened,
  Closed,
}

impl BarrierState {
  pub const fn as_str(self) -> &'static str {
    match self {
      BarrierState::Opened => "OPENED",
      BarrierState::Closed => "CLOSED",
    }
  }

  /// Parse a client-supplied state. Transitional states reported by gate
  /// controllers (`OPENING`, `CLOSING`) are not accepted.
  pub fn parse(raw: &str) -> Result<Self> {
    match raw {
      "OPENED" => Ok(BarrierState::Opened),
      "CLOSED" => Ok(BarrierState::Closed),
      _ => Err(Error::invalid(Field::State, "state must be OPENED or CLOSED")),
    }
  }
}

/// The last written state of a barrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
  pub id:         String,
  pub state:      BarrierState,
  pub updated_at: Timestamp,
}
