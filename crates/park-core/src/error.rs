//! Error types for `park-core`.

use std::fmt;

use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Spot,
  Barrier,
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Entity::Spot => "spot",
      Entity::Barrier => "barrier",
    })
  }
}

/// The request field an [`Error::InvalidArgument`] was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Id,
  Label,
  Status,
  State,
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Field::Id => "id",
      Field::Label => "label",
      Field::Status => "status",
      Field::State => "state",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing input, detected before any storage access.
  #[error("invalid {field}: {reason}")]
  InvalidArgument { field: Field, reason: String },

  #[error("{entity} {id:?} not found")]
  NotFound { entity: Entity, id: String },

  #[error("{entity} {id:?} already exists")]
  AlreadyExists { entity: Entity, id: String },
}

impl Error {
  pub fn invalid(field: Field, reason: impl Into<String>) -> Self {
    Self::InvalidArgument { field, reason: reason.into() }
  }

  pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
    Self::NotFound { entity, id: id.into() }
  }

  pub fn already_exists(entity: Entity, id: impl Into<String>) -> Self {
    Self::AlreadyExists { entity, id: id.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
