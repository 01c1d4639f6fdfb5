// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound device status messages
//!
//! The device publishes JSON objects on the status topic, possibly carrying an
//! `"online"` key and per-relay keys mapped to `"on"`/`"off"`, e.g.
//! `{"online":"on","l1":"off","l2":"on"}`. The transport's receive loop parses
//! them into `StatusEvent`s for the tick thread to drain.

use crate::schedule::RelayAction;
use thiserror::Error;

/// A parsed status report from the device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusEvent {
    /// Device online flag, when the report carries one
    pub online: Option<bool>,
    /// Relay states carried by the report
    pub relays: Vec<(String, RelayAction)>,
}

#[derive(Debug, Error)]
pub enum StatusParseError {
    #[error("status payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("status payload is not a JSON object")]
    NotAnObject,
}

impl StatusEvent {
    /// Parse a status payload
    ///
    /// Unknown keys and non-action values are ignored; the device firmware has
    /// grown fields over time and old daemons must keep working.
    pub fn parse(payload: &[u8]) -> Result<Self, StatusParseError> {
        let value: serde_json::Value = serde_json::from_slice(payload)?;
        let map = value.as_object().ok_or(StatusParseError::NotAnObject)?;

        let mut event = StatusEvent::default();
        for (key, value) in map {
            let Some(text) = value.as_str() else {
                continue;
            };
            if key == "online" {
                event.online = Some(text == "on");
            } else if let Ok(action) = text.parse::<RelayAction>() {
                event.relays.push((key.clone(), action));
            }
        }
        Ok(event)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
