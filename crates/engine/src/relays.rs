// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Last-known relay state mirror
//!
//! Mirrors the device's status reports; the engine only reads it to decide
//! whether a command is necessary. All mutation happens on the tick thread,
//! which drains the transport's status channel at the top of each wake-up.

use relayd_core::{RelayAction, StatusEvent};
use std::collections::HashMap;

/// Relay states as last reported by the device
#[derive(Debug, Clone, Default)]
pub struct RelayStates {
    states: HashMap<String, RelayAction>,
    online: Option<bool>,
}

impl RelayStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one status report into the mirror
    pub fn apply(&mut self, event: &StatusEvent) {
        if let Some(online) = event.online {
            self.online = Some(online);
        }
        for (key, action) in &event.relays {
            self.states.insert(key.clone(), *action);
        }
    }

    /// Last-known state for a relay, if the device has ever reported it
    pub fn get(&self, key: &str) -> Option<RelayAction> {
        self.states.get(key).copied()
    }

    /// Device online flag from the most recent report carrying one
    pub fn online(&self) -> Option<bool> {
        self.online
    }
}

#[cfg(test)]
#[path = "relays_tests.rs"]
mod tests;
