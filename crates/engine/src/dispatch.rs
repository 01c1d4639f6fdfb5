// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command dispatcher
//!
//! Turns a desired-state map into the minimal set of outbound relay commands.
//! Commands are fire-and-forget: if the transport is down after one throttled
//! reconnect attempt, the whole tick's commands are dropped — the next tick
//! recomputes the same desired state and retries, so nothing is queued and
//! nothing is permanently lost while a schedule stays active.

use crate::relays::RelayStates;
use relayd_core::{Qos, RelayAction, Transport, TransportError};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Emits relay commands over the transport, one message per drifted relay
pub struct Dispatcher<T: Transport> {
    transport: T,
    command_topic: String,
    reconnect_min_interval: Duration,
    last_reconnect_attempt: Option<Instant>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, command_topic: impl Into<String>, reconnect_min_interval: Duration) -> Self {
        Self {
            transport,
            command_topic: command_topic.into(),
            reconnect_min_interval,
            last_reconnect_attempt: None,
        }
    }

    /// Publish commands for every relay whose last-known state differs from
    /// `desired`; relays the device has never reported always get a command.
    ///
    /// Returns the commands actually issued.
    pub async fn dispatch(
        &mut self,
        desired: &BTreeMap<String, RelayAction>,
        known: &RelayStates,
    ) -> Vec<(String, RelayAction)> {
        let drifted: Vec<(&String, RelayAction)> = desired
            .iter()
            .filter(|(key, action)| known.get(key) != Some(**action))
            .map(|(key, action)| (key, *action))
            .collect();

        if drifted.is_empty() {
            return Vec::new();
        }

        if !self.ensure_connected().await {
            debug!(
                dropped = drifted.len(),
                "transport down, dropping this tick's commands"
            );
            return Vec::new();
        }

        let mut issued = Vec::new();
        for (key, action) in drifted {
            let payload = command_payload(key, action);
            match self
                .transport
                .publish(&self.command_topic, payload.as_bytes(), false, Qos::AtMostOnce)
                .await
            {
                Ok(()) => issued.push((key.clone(), action)),
                Err(e) => warn!(relay = %key, error = %e, "command publish failed"),
            }
        }
        issued
    }

    /// Ask the device to publish its current status
    pub async fn request_status(&self) -> Result<(), TransportError> {
        self.transport
            .publish(
                &self.command_topic,
                br#"{"get":"status"}"#,
                false,
                Qos::AtMostOnce,
            )
            .await
    }

    /// True when the transport is usable, attempting at most one throttled
    /// reconnect when it is not
    async fn ensure_connected(&mut self) -> bool {
        if self.transport.connected() {
            return true;
        }

        let throttled = self
            .last_reconnect_attempt
            .is_some_and(|at| at.elapsed() < self.reconnect_min_interval);
        if throttled {
            return false;
        }

        self.last_reconnect_attempt = Some(Instant::now());
        match self.transport.reconnect().await {
            Ok(()) => self.transport.connected(),
            Err(e) => {
                warn!(error = %e, "reconnect attempt failed");
                false
            }
        }
    }
}

/// Single-relay command payload, e.g. `{"l2":"off"}`
fn command_payload(key: &str, action: RelayAction) -> String {
    let mut object = serde_json::Map::new();
    object.insert(
        key.to_string(),
        serde_json::Value::String(action.to_string()),
    );
    serde_json::Value::Object(object).to_string()
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
