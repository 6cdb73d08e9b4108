//! SQL schema for the parking SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS spots (
    id          TEXT PRIMARY KEY,
    label       TEXT NOT NULL,
    status      TEXT NOT NULL CHECK (status IN ('FREE', 'OCCUPIED')),
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC, millisecond precision
);

-- Rows appear on the first open/close command; there is no creation step.
CREATE TABLE IF NOT EXISTS barriers (
    id          TEXT PRIMARY KEY,
    state       TEXT NOT NULL CHECK (state IN ('OPENED', 'CLOSED')),
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS spots_status_idx ON spots(status);

PRAGMA user_version = 1;
";
