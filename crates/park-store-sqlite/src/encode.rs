//! Decoding helpers between the plain-text representations stored in SQLite
//! columns and the domain types.
//!
//! Enums are stored as their upper-case wire names; timestamps as the
//! millisecond ISO 8601 string produced by [`Timestamp`]'s `Display`.

use park_core::{
  Timestamp,
  barrier::{Barrier, BarrierState},
  spot::{Spot, SpotStatus},
};

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn decode_ts(s: &str) -> Result<Timestamp> {
  s.parse()
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

pub fn decode_spot_status(s: &str) -> Result<SpotStatus> {
  SpotStatus::parse(s).map_err(|_| Error::Decode(format!("unknown spot status: {s:?}")))
}

pub fn decode_barrier_state(s: &str) -> Result<BarrierState> {
  BarrierState::parse(s)
    .map_err(|_| Error::Decode(format!("unknown barrier state: {s:?}")))
}

/// SQLite counts are `i64`; a negative one means a corrupted query.
pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::Decode(format!("negative count: {n}")))
}

/// True when `err` is a primary-key or unique constraint violation.
///
/// Matches on the extended result code rather than the message text.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.code == rusqlite::ErrorCode::ConstraintViolation
        && matches!(
          e.extended_code,
          rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
  )
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// Row from `spots`, before decoding.
pub struct RawSpot {
  pub id:         String,
  pub label:      String,
  pub status:     String,
  pub updated_at: String,
}

impl RawSpot {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      label:      row.get(1)?,
      status:     row.get(2)?,
      updated_at: row.get(3)?,
    })
  }

  pub fn into_spot(self) -> Result<Spot> {
    Ok(Spot {
      status:     decode_spot_status(&self.status)?,
      updated_at: decode_ts(&self.updated_at)?,
      id:         self.id,
      label:      self.label,
    })
  }
}

/// Row from `barriers`, before decoding.
pub struct RawBarrier {
  pub id:         String,
  pub state:      String,
  pub updated_at: String,
}

impl RawBarrier {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      state:      row.get(1)?,
      updated_at: row.get(2)?,
    })
  }

  pub fn into_barrier(self) -> Result<Barrier> {
    Ok(Barrier {
      state:      decode_barrier_state(&self.state)?,
      updated_at: decode_ts(&self.updated_at)?,
      id:         self.id,
    })
  }
}
