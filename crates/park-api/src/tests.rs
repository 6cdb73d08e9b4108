//! Router-level tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode},
};
use park_core::{
  barrier::{Barrier, BarrierState},
  spot::{AvailableSpot, NewSpot, ParkingState, Spot, SpotStatus, StatusChange},
  store::{BarrierStore, SpotStore, Store, StoreError},
};
use park_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn make_store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

async fn oneshot<S>(store: Arc<S>, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value)
where
  S: SpotStore + BarrierStore + 'static,
{
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header("content-type", "application/json");
  }
  let req = builder
    .body(Body::from(body.unwrap_or_default().to_owned()))
    .unwrap();

  let resp = api_router(store).oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

// ── Places ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_with_defaults() {
  let store = make_store().await;
  let (status, body) = oneshot(store, "POST", "/places", Some(r#"{"id":"A1"}"#)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body, json!({ "id": "A1", "label": "A1", "status": "FREE" }));
}

#[tokio::test]
async fn create_keeps_supplied_label() {
  let store = make_store().await;
  let (status, body) = oneshot(
    store.clone(),
    "POST",
    "/places",
    Some(r#"{"id":"A2","label":"Near the lift"}"#),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["label"], "Near the lift");

  let (_, body) = oneshot(store, "GET", "/places/A2", None).await;
  assert_eq!(body["label"], "Near the lift");
}

#[tokio::test]
async fn create_with_null_label_defaults_to_id() {
  let store = make_store().await;
  let (status, body) =
    oneshot(store, "POST", "/places", Some(r#"{"id":"A3","label":null}"#)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["label"], "A3");
}

#[tokio::test]
async fn create_rejects_missing_or_malformed_id() {
  let store = make_store().await;
  for body in [
    None,
    Some(""),
    Some("not json"),
    Some("{}"),
    Some(r#"{"id":""}"#),
    Some(r#"{"id":42}"#),
    Some(r#"{"label":"x"}"#),
  ] {
    let (status, resp) = oneshot(store.clone(), "POST", "/places", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
    assert_eq!(resp["error"], "INVALID_ID", "body {body:?}");
    assert!(resp["message"].is_string());
  }

  let (_, list) = oneshot(store, "GET", "/places", None).await;
  assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_rejects_non_string_label() {
  let store = make_store().await;
  let (status, body) =
    oneshot(store, "POST", "/places", Some(r#"{"id":"A1","label":7}"#)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "INVALID_LABEL");
}

#[tokio::test]
async fn duplicate_create_returns_409_and_keeps_original() {
  let store = make_store().await;
  oneshot(store.clone(), "POST", "/places", Some(r#"{"id":"A1","label":"first"}"#)).await;

  let (status, body) = oneshot(
    store.clone(),
    "POST",
    "/places",
    Some(r#"{"id":"A1","label":"second"}"#),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["error"], "ALREADY_EXISTS");

  let (_, body) = oneshot(store, "GET", "/places/A1", None).await;
  assert_eq!(body["label"], "first");
}

#[tokio::test]
async fn list_returns_full_records_ordered_by_id() {
  let store = make_store().await;
  for id in ["B2", "A1"] {
    oneshot(store.clone(), "POST", "/places", Some(format!(r#"{{"id":"{id}"}}"#).as_str())).await;
  }

  let (status, body) = oneshot(store, "GET", "/places", None).await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0]["id"], "A1");
  assert_eq!(rows[1]["id"], "B2");
  for row in rows {
    assert_eq!(row["status"], "FREE");
    let ts = row["updated_at"].as_str().unwrap();
    assert!(ts.ends_with('Z') && ts.len() == "2026-01-01T00:00:00.000Z".len(), "{ts}");
  }
}

#[tokio::test]
async fn unknown_place_returns_404() {
  let store = make_store().await;
  let (status, body) = oneshot(store.clone(), "GET", "/places/unknown", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "NOT_FOUND");
  assert!(body["message"].is_string());

  let (status, body) = oneshot(store, "GET", "/places/unknown/status", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn get_status_returns_only_status() {
  let store = make_store().await;
  oneshot(store.clone(), "POST", "/places", Some(r#"{"id":"A1"}"#)).await;

  let (status, body) = oneshot(store, "GET", "/places/A1/status", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "status": "FREE" }));
}

#[tokio::test]
async fn invalid_status_is_400_for_existing_and_missing_ids() {
  let store = make_store().await;
  oneshot(store.clone(), "POST", "/places", Some(r#"{"id":"A1"}"#)).await;

  for uri in ["/places/A1/status", "/places/ghost/status"] {
    for body in [None, Some(r#"{"status":"BROKEN"}"#), Some(r#"{"status":1}"#), Some("{}")] {
      let (status, resp) = oneshot(store.clone(), "PUT", uri, body).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body:?}");
      assert_eq!(resp["error"], "INVALID_STATUS");
    }
  }

  let (_, body) = oneshot(store, "GET", "/places/A1/status", None).await;
  assert_eq!(body["status"], "FREE");
}

#[tokio::test]
async fn set_status_on_missing_spot_returns_404() {
  let store = make_store().await;
  let (status, body) = oneshot(
    store.clone(),
    "PUT",
    "/places/ghost/status",
    Some(r#"{"status":"OCCUPIED"}"#),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "NOT_FOUND");

  let (_, list) = oneshot(store, "GET", "/places", None).await;
  assert_eq!(list, json!([]));
}

// ── Parking aggregates ─────────────────────────────────────────────────────────

#[tokio::test]
async fn occupy_spot_end_to_end() {
  let store = make_store().await;

  let (status, body) =
    oneshot(store.clone(), "POST", "/places", Some(r#"{"id":"A1"}"#)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body, json!({ "id": "A1", "label": "A1", "status": "FREE" }));

  let (status, body) = oneshot(
    store.clone(),
    "PUT",
    "/places/A1/status",
    Some(r#"{"status":"OCCUPIED"}"#),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["id"], "A1");
  assert_eq!(body["status"], "OCCUPIED");
  assert!(body["updated_at"].is_string());

  let (status, body) = oneshot(store, "GET", "/parking/state", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "total": 1, "free": 0, "occupied": 1 }));
}

#[tokio::test]
async fn empty_parking_state_is_zeroes_and_available_is_empty_list() {
  let store = make_store().await;

  let (status, body) = oneshot(store.clone(), "GET", "/parking/state", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "total": 0, "free": 0, "occupied": 0 }));

  let (status, body) = oneshot(store, "GET", "/parking/available", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn available_lists_only_free_spots() {
  let store = make_store().await;
  for id in ["A1", "A2", "A3"] {
    oneshot(store.clone(), "POST", "/places", Some(format!(r#"{{"id":"{id}"}}"#).as_str())).await;
  }
  oneshot(
    store.clone(),
    "PUT",
    "/places/A2/status",
    Some(r#"{"status":"OCCUPIED"}"#),
  )
  .await;

  let (status, body) = oneshot(store, "GET", "/parking/available", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([{ "id": "A1" }, { "id": "A3" }]));
}

// ── Barriers ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_barrier_returns_404() {
  let store = make_store().await;
  let (status, body) = oneshot(store, "GET", "/barrier/B1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn open_barrier_end_to_end() {
  let store = make_store().await;

  let (status, body) = oneshot(store.clone(), "POST", "/barrier/B1/open", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["ok"], true);
  assert_eq!(body["id"], "B1");
  assert_eq!(body["state"], "OPENED");
  assert!(body["updated_at"].is_string());

  let (status, body) = oneshot(store, "GET", "/barrier/B1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["state"], "OPENED");
  assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn open_twice_is_idempotent_and_close_overwrites() {
  let store = make_store().await;

  let (_, first) = oneshot(store.clone(), "POST", "/barrier/B1/open", None).await;
  let (_, second) = oneshot(store.clone(), "POST", "/barrier/B1/open", None).await;
  assert_eq!((&first["id"], &first["state"]), (&second["id"], &second["state"]));

  let (status, body) = oneshot(store.clone(), "POST", "/barrier/B1/close", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["ok"], true);
  assert_eq!(body["state"], "CLOSED");

  let (_, body) = oneshot(store, "GET", "/barrier/B1", None).await;
  assert_eq!(body["state"], "CLOSED");
}

#[tokio::test]
async fn put_barrier_state_accepts_terminal_states_only() {
  let store = make_store().await;

  let (status, body) = oneshot(
    store.clone(),
    "PUT",
    "/barrier/G1/state",
    Some(r#"{"state":"CLOSED"}"#),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["ok"], true);
  assert_eq!(body["state"], "CLOSED");

  for bad in [r#"{"state":"OPENING"}"#, r#"{"state":"CLOSING"}"#, "{}"] {
    let (status, body) = oneshot(store.clone(), "PUT", "/barrier/G1/state", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
    assert_eq!(body["error"], "INVALID_STATE");
  }

  let (_, body) = oneshot(store, "GET", "/barrier/G1", None).await;
  assert_eq!(body["state"], "CLOSED");
}

// ── Health ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
  let store = make_store().await;
  let (status, body) = oneshot(store, "GET", "/health", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "ok");
}

// ── Storage failures ───────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct Offline;

impl StoreError for Offline {
  fn into_domain(self) -> Result<park_core::Error, Self> { Err(self) }
}

/// A store whose backend is unreachable.
struct OfflineStore;

impl Store for OfflineStore {
  type Error = Offline;
}

impl SpotStore for OfflineStore {
  async fn create_spot(&self, _input: NewSpot) -> Result<Spot, Offline> { Err(Offline) }

  async fn list_spots(&self) -> Result<Vec<Spot>, Offline> { Err(Offline) }

  async fn get_spot(&self, _id: &str) -> Result<Option<Spot>, Offline> { Err(Offline) }

  async fn get_spot_status(&self, _id: &str) -> Result<Option<SpotStatus>, Offline> {
    Err(Offline)
  }

  async fn set_spot_status(
    &self,
    _id: &str,
    _status: SpotStatus,
  ) -> Result<StatusChange, Offline> {
    Err(Offline)
  }

  async fn list_available(&self) -> Result<Vec<AvailableSpot>, Offline> { Err(Offline) }

  async fn aggregate_state(&self) -> Result<ParkingState, Offline> { Err(Offline) }
}

impl BarrierStore for OfflineStore {
  async fn get_barrier(&self, _id: &str) -> Result<Option<Barrier>, Offline> { Err(Offline) }

  async fn set_barrier_state(
    &self,
    _id: &str,
    _state: BarrierState,
  ) -> Result<Barrier, Offline> {
    Err(Offline)
  }
}

#[tokio::test]
async fn storage_failures_return_500_db_error() {
  let store = Arc::new(OfflineStore);
  let cases = [
    ("POST", "/places", Some(r#"{"id":"A1"}"#)),
    ("GET", "/places", None),
    ("GET", "/places/A1", None),
    ("PUT", "/places/A1/status", Some(r#"{"status":"FREE"}"#)),
    ("GET", "/parking/available", None),
    ("GET", "/parking/state", None),
    ("GET", "/barrier/B1", None),
    ("POST", "/barrier/B1/open", None),
  ];
  for (method, uri, body) in cases {
    let (status, resp) = oneshot(store.clone(), method, uri, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
    assert_eq!(resp["error"], "DB_ERROR");
    assert!(!resp["message"].as_str().unwrap().contains("disk on fire"));
  }
}

#[tokio::test]
async fn validation_runs_before_an_offline_store_is_touched() {
  let store = Arc::new(OfflineStore);
  let (status, body) = oneshot(
    store,
    "PUT",
    "/places/A1/status",
    Some(r#"{"status":"MAYBE"}"#),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "INVALID_STATUS");
}
