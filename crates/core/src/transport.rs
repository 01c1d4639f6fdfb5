// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport capability the engine dispatches commands through
//!
//! The engine never talks to a broker directly: it only needs publish,
//! reconnect, and a connectivity probe. Concrete implementations live in
//! relayd-adapters.

use async_trait::async_trait;
use thiserror::Error;

/// MQTT quality-of-service level for outbound messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qos {
    AtMostOnce,
    AtLeastOnce,
}

/// Errors from transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("not connected to broker")]
    NotConnected,
    #[error("publish to {topic} failed: {reason}")]
    PublishFailed { topic: String, reason: String },
    #[error("subscribe to {topic} failed: {reason}")]
    SubscribeFailed { topic: String, reason: String },
    #[error("reconnect failed: {0}")]
    ReconnectFailed(String),
}

/// Publish/reconnect capability over the messaging layer
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Publish a payload to a topic
    async fn publish(
        &self,
        topic: &str,
        payload: &[u8],
        retain: bool,
        qos: Qos,
    ) -> Result<(), TransportError>;

    /// Attempt to re-establish the broker connection
    async fn reconnect(&self) -> Result<(), TransportError>;

    /// Whether the transport currently reports a live connection
    fn connected(&self) -> bool;
}
