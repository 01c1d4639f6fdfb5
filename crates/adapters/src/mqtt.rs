// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MQTT transport over rumqttc
//!
//! The `AsyncClient` handle is cheap to clone and safe to publish through from
//! the tick thread. A background event pump owns the broker session: it polls
//! the event loop (which re-dials on failure), tracks connectivity, resubscribes
//! to the status topic after every reconnect, and forwards parsed status
//! reports into an mpsc channel for the tick thread to drain. The pump never
//! touches engine state.

use async_trait::async_trait;
use relayd_core::{MqttConfig, Qos, StatusEvent, Transport, TransportError};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Pause after a connection error so the pump does not re-dial in a tight loop
const ERROR_PAUSE: Duration = Duration::from_secs(2);

/// MQTT-backed implementation of the engine's transport capability
#[derive(Clone)]
pub struct MqttTransport {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
}

impl MqttTransport {
    /// Connect to the broker and spawn the background event pump
    ///
    /// Status reports arriving on `config.status_topic` are parsed and sent
    /// through `status_tx`; the pump exits when the receiver is dropped.
    pub fn connect(
        config: &MqttConfig,
        status_tx: mpsc::Sender<StatusEvent>,
    ) -> (Self, JoinHandle<()>) {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(60));

        let (client, event_loop) = AsyncClient::new(options, 16);
        let connected = Arc::new(AtomicBool::new(false));

        let pump = tokio::spawn(run_event_pump(
            event_loop,
            client.clone(),
            Arc::clone(&connected),
            config.status_topic.clone(),
            status_tx,
        ));

        (Self { client, connected }, pump)
    }
}

#[async_trait]
impl Transport for MqttTransport {
    async fn publish(
        &self,
        topic: &str,
        payload: &[u8],
        retain: bool,
        qos: Qos,
    ) -> Result<(), TransportError> {
        if !self.connected() {
            return Err(TransportError::NotConnected);
        }
        self.client
            .publish(topic, map_qos(qos), retain, payload.to_vec())
            .await
            .map_err(|e| TransportError::PublishFailed {
                topic: topic.to_string(),
                reason: e.to_string(),
            })
    }

    async fn reconnect(&self) -> Result<(), TransportError> {
        // The event pump owns the session and re-dials on every poll failure;
        // a reconnect request only reports whether it has succeeded yet.
        if self.connected() {
            Ok(())
        } else {
            Err(TransportError::ReconnectFailed(
                "broker session not re-established yet".to_string(),
            ))
        }
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

fn map_qos(qos: Qos) -> QoS {
    match qos {
        Qos::AtMostOnce => QoS::AtMostOnce,
        Qos::AtLeastOnce => QoS::AtLeastOnce,
    }
}

async fn run_event_pump(
    mut event_loop: EventLoop,
    client: AsyncClient,
    connected: Arc<AtomicBool>,
    status_topic: String,
    status_tx: mpsc::Sender<StatusEvent>,
) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                connected.store(true, Ordering::SeqCst);
                info!(topic = %status_topic, "connected to broker, subscribing to status");
                if let Err(e) = client.subscribe(&status_topic, QoS::AtMostOnce).await {
                    warn!(topic = %status_topic, error = %e, "status subscribe failed");
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if publish.topic != status_topic {
                    continue;
                }
                match StatusEvent::parse(&publish.payload) {
                    Ok(event) => {
                        if status_tx.send(event).await.is_err() {
                            // Receiver gone: the daemon is shutting down
                            debug!("status channel closed, stopping event pump");
                            return;
                        }
                    }
                    Err(e) => warn!(error = %e, "ignoring malformed status payload"),
                }
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                connected.store(false, Ordering::SeqCst);
                warn!("broker sent disconnect");
            }
            Ok(_) => {}
            Err(e) => {
                connected.store(false, Ordering::SeqCst);
                warn!(error = %e, "broker connection lost");
                tokio::time::sleep(ERROR_PAUSE).await;
            }
        }
    }
}
