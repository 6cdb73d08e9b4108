//! Core types and trait definitions for the parking state service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the HTTP layer both depend on it.

pub mod barrier;
pub mod error;
pub mod spot;
pub mod store;
pub mod time;

pub use error::{Entity, Error, Field, Result};
pub use time::Timestamp;
