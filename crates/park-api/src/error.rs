//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure maps to exactly one status code and a body of the form
//! `{"error": "<CODE>", "message": "<text>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use park_core::{Field, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Domain(#[from] park_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error: domain outcomes keep their meaning, anything
  /// else becomes a storage failure.
  pub fn store<E: StoreError>(err: E) -> Self {
    match err.into_domain() {
      Ok(domain) => ApiError::Domain(domain),
      Err(other) => ApiError::Store(Box::new(other)),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Domain(park_core::Error::InvalidArgument { .. }) => StatusCode::BAD_REQUEST,
      ApiError::Domain(park_core::Error::NotFound { .. }) => StatusCode::NOT_FOUND,
      ApiError::Domain(park_core::Error::AlreadyExists { .. }) => StatusCode::CONFLICT,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Machine-readable error code.
  pub fn code(&self) -> &'static str {
    match self {
      ApiError::Domain(park_core::Error::InvalidArgument { field, .. }) => match field {
        Field::Id => "INVALID_ID",
        Field::Label => "INVALID_LABEL",
        Field::Status => "INVALID_STATUS",
        Field::State => "INVALID_STATE",
      },
      ApiError::Domain(park_core::Error::NotFound { .. }) => "NOT_FOUND",
      ApiError::Domain(park_core::Error::AlreadyExists { .. }) => "ALREADY_EXISTS",
      ApiError::Store(_) => "DB_ERROR",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let code = self.code();
    let message = match &self {
      ApiError::Domain(e) => e.to_string(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "storage failure");
        "storage operation failed".to_owned()
      }
    };
    (status, Json(json!({ "error": code, "message": message }))).into_response()
  }
}
