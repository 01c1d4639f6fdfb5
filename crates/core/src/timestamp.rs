// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing and formatting for the persisted `YYYY-MM-DD HH:MM:SS` format
//!
//! The authoring surface historically wrote minute-precision timestamps, so
//! `YYYY-MM-DD HH:MM` is accepted with seconds assumed `:00`.

use chrono::NaiveDateTime;
use thiserror::Error;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of a minute-precision timestamp (`YYYY-MM-DD HH:MM`)
const MINUTE_PRECISION_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("invalid timestamp {value:?}: {source}")]
    Invalid {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parse a schedule timestamp, accepting both minute and second precision
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = value.trim();
    let normalized = if trimmed.len() == MINUTE_PRECISION_LEN {
        format!("{}:00", trimmed)
    } else {
        trimmed.to_string()
    };
    NaiveDateTime::parse_from_str(&normalized, FORMAT).map_err(|source| TimestampError::Invalid {
        value: value.to_string(),
        source,
    })
}

/// Format a timestamp in the persisted second-precision form
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
