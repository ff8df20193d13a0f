//! Wire models exchanged with the WordWise REST backend.
//!
//! The backend is not consistent between endpoints, so most fields are
//! optional and accept a few spellings. Conversion into domain types happens
//! through `TryFrom`, which is where invariants are enforced.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod content;
pub mod report;
pub mod user;

/// Enum value sent either as its numeric code or as its name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CodeOrName {
    Code(i64),
    Name(String),
}

/// Accepts ISO timestamps with or without fraction and offset.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_with_and_without_offset() {
        assert!(parse_timestamp("2024-05-01T10:20:30.1234567").is_some());
        assert!(parse_timestamp("2024-05-01T10:20:30").is_some());
        assert!(parse_timestamp("2024-05-01T10:20:30Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
