//! [`SqliteStore`] — the SQLite implementation of the parking repositories.

use std::path::Path;

use rusqlite::OptionalExtension as _;

use park_core::{
  Entity, Timestamp,
  barrier::{Barrier, BarrierState},
  spot::{AvailableSpot, NewSpot, ParkingState, Spot, SpotStatus, StatusChange},
  store::{BarrierStore, SpotStore, Store},
};

use crate::{
  Error, Result,
  encode::{RawBarrier, RawSpot, decode_count, decode_spot_status, is_unique_violation},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Spot and barrier state backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl Store for SqliteStore {
  type Error = Error;
}

// ─── SpotStore impl ──────────────────────────────────────────────────────────

impl SpotStore for SqliteStore {
  async fn create_spot(&self, input: NewSpot) -> Result<Spot> {
    let spot = Spot {
      id:         input.id().to_owned(),
      label:      input.label().to_owned(),
      status:     SpotStatus::Free,
      updated_at: Timestamp::now(),
    };

    let id_str     = spot.id.clone();
    let label_str  = spot.label.clone();
    let status_str = spot.status.as_str();
    let at_str     = spot.updated_at.to_string();

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO spots (id, label, status, updated_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, label_str, status_str, at_str],
        );
        match res {
          Ok(_) => Ok(true),
          Err(e) if is_unique_violation(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(park_core::Error::already_exists(Entity::Spot, spot.id).into());
    }
    Ok(spot)
  }

  async fn list_spots(&self) -> Result<Vec<Spot>> {
    let raws: Vec<RawSpot> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, label, status, updated_at FROM spots ORDER BY id")?;
        let rows = stmt
          .query_map([], RawSpot::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSpot::into_spot).collect()
  }

  async fn get_spot(&self, id: &str) -> Result<Option<Spot>> {
    let id_str = id.to_owned();

    let raw: Option<RawSpot> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, label, status, updated_at FROM spots WHERE id = ?1",
            rusqlite::params![id_str],
            RawSpot::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSpot::into_spot).transpose()
  }

  async fn get_spot_status(&self, id: &str) -> Result<Option<SpotStatus>> {
    let id_str = id.to_owned();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT status FROM spots WHERE id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    raw.as_deref().map(decode_spot_status).transpose()
  }

  async fn set_spot_status(&self, id: &str, status: SpotStatus) -> Result<StatusChange> {
    let change = StatusChange {
      id: id.to_owned(),
      status,
      updated_at: Timestamp::now(),
    };

    let id_str     = change.id.clone();
    let status_str = status.as_str();
    let at_str     = change.updated_at.to_string();

    let affected: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE spots SET status = ?1, updated_at = ?2 WHERE id = ?3",
          rusqlite::params![status_str, at_str, id_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(park_core::Error::not_found(Entity::Spot, change.id).into());
    }
    Ok(change)
  }

  async fn list_available(&self) -> Result<Vec<AvailableSpot>> {
    let ids: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id FROM spots WHERE status = 'FREE' ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids.into_iter().map(|id| AvailableSpot { id }).collect())
  }

  async fn aggregate_state(&self) -> Result<ParkingState> {
    let (total, free, occupied): (i64, i64, i64) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT
             COUNT(*),
             COALESCE(SUM(CASE WHEN status = 'FREE'     THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN status = 'OCCUPIED' THEN 1 ELSE 0 END), 0)
           FROM spots",
          [],
          |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?)
      })
      .await?;

    Ok(ParkingState {
      total:    decode_count(total)?,
      free:     decode_count(free)?,
      occupied: decode_count(occupied)?,
    })
  }
}

// ─── BarrierStore impl ───────────────────────────────────────────────────────

impl BarrierStore for SqliteStore {
  async fn get_barrier(&self, id: &str) -> Result<Option<Barrier>> {
    let id_str = id.to_owned();

    let raw: Option<RawBarrier> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, state, updated_at FROM barriers WHERE id = ?1",
            rusqlite::params![id_str],
            RawBarrier::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawBarrier::into_barrier).transpose()
  }

  async fn set_barrier_state(&self, id: &str, state: BarrierState) -> Result<Barrier> {
    let barrier = Barrier {
      id: id.to_owned(),
      state,
      updated_at: Timestamp::now(),
    };

    let id_str    = barrier.id.clone();
    let state_str = state.as_str();
    let at_str    = barrier.updated_at.to_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO barriers (id, state, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(id) DO UPDATE SET
             state      = excluded.state,
             updated_at = excluded.updated_at",
          rusqlite::params![id_str, state_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(barrier)
  }
}
