//! Millisecond-precision UTC timestamps.
//!
//! Every `updated_at` value is generated by the service, not by the storage
//! engine, and is rendered as ISO 8601 with exactly three fractional digits
//! and a `Z` suffix, e.g. `2026-10-19T08:15:00.123Z`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
  /// The current instant, truncated to whole milliseconds.
  pub fn now() -> Self { Self(Utc::now().trunc_subsecs(3)) }

  pub fn as_datetime(&self) -> DateTime<Utc> { self.0 }
}

impl From<DateTime<Utc>> for Timestamp {
  fn from(dt: DateTime<Utc>) -> Self { Self(dt.trunc_subsecs(3)) }
}

impl fmt::Display for Timestamp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
  }
}

impl FromStr for Timestamp {
  type Err = chrono::ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DateTime::parse_from_rfc3339(s).map(|dt| Self::from(dt.with_timezone(&Utc)))
  }
}

impl Serialize for Timestamp {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Timestamp {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
  }
}
