// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport with call recording for testing

use async_trait::async_trait;
use relayd_core::{Qos, Transport, TransportError};
use std::sync::{Arc, Mutex};

/// Recorded outbound publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub retain: bool,
    pub qos: Qos,
}

impl PublishedMessage {
    /// Payload as UTF-8 for assertions
    pub fn payload_str(&self) -> String {
        String::from_utf8_lossy(&self.payload).to_string()
    }
}

/// Shared state for the fake transport
struct FakeState {
    connected: bool,
    reconnect_succeeds: bool,
    publish_fails: bool,
    published: Vec<PublishedMessage>,
    reconnect_attempts: usize,
}

/// Fake transport: records publishes, scripts connectivity
#[derive(Clone)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTransport {
    /// A connected fake whose reconnects succeed
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                connected: true,
                reconnect_succeeds: true,
                publish_fails: false,
                published: Vec::new(),
                reconnect_attempts: 0,
            })),
        }
    }

    /// A disconnected fake whose reconnects fail
    pub fn down() -> Self {
        let fake = Self::new();
        fake.set_connected(false);
        fake.set_reconnect_succeeds(false);
        fake
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    pub fn set_reconnect_succeeds(&self, succeeds: bool) {
        self.lock().reconnect_succeeds = succeeds;
    }

    pub fn set_publish_fails(&self, fails: bool) {
        self.lock().publish_fails = fails;
    }

    /// All recorded publishes
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.lock().published.clone()
    }

    /// Clear recorded publishes
    pub fn clear_published(&self) {
        self.lock().published.clear();
    }

    /// How many reconnects were requested
    pub fn reconnect_attempts(&self) -> usize {
        self.lock().reconnect_attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn publish(
        &self,
        topic: &str,
        payload: &[u8],
        retain: bool,
        qos: Qos,
    ) -> Result<(), TransportError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(TransportError::NotConnected);
        }
        if state.publish_fails {
            return Err(TransportError::PublishFailed {
                topic: topic.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        state.published.push(PublishedMessage {
            topic: topic.to_string(),
            payload: payload.to_vec(),
            retain,
            qos,
        });
        Ok(())
    }

    async fn reconnect(&self) -> Result<(), TransportError> {
        let mut state = self.lock();
        state.reconnect_attempts += 1;
        if state.reconnect_succeeds {
            state.connected = true;
            Ok(())
        } else {
            Err(TransportError::ReconnectFailed(
                "scripted failure".to_string(),
            ))
        }
    }

    fn connected(&self) -> bool {
        self.lock().connected
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
