//! Parking spots and their occupancy status.

use serde::{Deserialize, Serialize};

use crate::{Error, Field, Result, Timestamp};

/// Occupancy of a single spot. No other value is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatus {
  Free,
  Occupied,
}

impl SpotStatus {
  pub const fn as_str(self) -> &'static str {
    match self {
      SpotStatus::Free => "FREE",
      SpotStatus::Occupied => "OCCUPIED",
    }
  }

  /// Parse a client-supplied status. Matching is exact and case-sensitive.
  pub fn parse(raw: &str) -> Result<Self> {
    match raw {
      "FREE" => Ok(SpotStatus::Free),
      "OCCUPIED" => Ok(SpotStatus::Occupied),
      _ => Err(Error::invalid(Field::Status, "status must be FREE or OCCUPIED")),
    }
  }
}

/// A stored parking spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
  pub id:         String,
  pub label:      String,
  pub status:     SpotStatus,
  pub updated_at: Timestamp,
}

/// Input for [`SpotStore::create_spot`](crate::store::SpotStore::create_spot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpot {
  id:    String,
  label: Option<String>,
}

impl NewSpot {
  /// Fails with [`Error::InvalidArgument`] when `id` is empty.
  pub fn new(id: impl Into<String>, label: Option<String>) -> Result<Self> {
    let id = id.into();
    if id.is_empty() {
      return Err(Error::invalid(Field::Id, "id is required (string)"));
    }
    Ok(Self { id, label })
  }

  pub fn id(&self) -> &str { &self.id }

  /// The supplied label, falling back to the id.
  pub fn label(&self) -> &str { self.label.as_deref().unwrap_or(&self.id) }
}

/// Result of a successful status write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
  pub id:         String,
  pub status:     SpotStatus,
  pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableSpot {
  pub id: String,
}

/// Aggregate occupancy counters over every spot.
///
/// `free + occupied == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingState {
  pub total:    u64,
  pub free:     u64,
  pub occupied: u64,
}
