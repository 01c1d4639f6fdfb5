// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: wiring, the per-tick driver, shutdown.

use relayd_adapters::MqttTransport;
use relayd_core::{Clock, Config, StatusEvent, SystemClock, Transport};
use relayd_engine::{Dispatcher, Engine, EngineError, RelayStates, TickOutcome};
use relayd_storage::ScheduleStore;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How many status reports may queue between ticks before the pump backs off
const STATUS_CHANNEL_CAPACITY: usize = 64;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("storage error: {0}")]
    Storage(#[from] relayd_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The assembled daemon: store, engine, dispatcher, and the status channel
///
/// Generic over transport and clock so tests can drive it with fakes; the
/// binary instantiates it with the MQTT transport and the system clock.
pub struct Daemon<T: Transport, C: Clock> {
    store: ScheduleStore,
    relays: RelayStates,
    engine: Engine,
    dispatcher: Dispatcher<T>,
    transport: T,
    status_rx: mpsc::Receiver<StatusEvent>,
    clock: C,
    status_requested: bool,
}

impl<T: Transport, C: Clock> Daemon<T, C> {
    pub fn new(
        config: &Config,
        store: ScheduleStore,
        transport: T,
        status_rx: mpsc::Receiver<StatusEvent>,
        clock: C,
    ) -> Self {
        let dispatcher = Dispatcher::new(
            transport.clone(),
            config.mqtt.command_topic.clone(),
            config.reconnect_min_interval,
        );
        Self {
            store,
            relays: RelayStates::new(),
            engine: Engine::new(),
            dispatcher,
            transport,
            status_rx,
            clock,
            status_requested: false,
        }
    }

    /// Fold every queued status report into the relay mirror
    pub fn drain_status(&mut self) {
        while let Ok(event) = self.status_rx.try_recv() {
            self.relays.apply(&event);
        }
    }

    /// Run one scheduler tick: sync status, reconcile, dispatch, sweep
    pub async fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        self.request_status_once().await;
        self.drain_status();
        let now = self.clock.now();
        self.engine
            .tick(now, &mut self.store, &self.relays, &mut self.dispatcher)
            .await
    }

    /// Ask the device for a full status report, once per process lifetime
    ///
    /// Retried each tick until the broker session is up, then never again;
    /// ongoing state is kept fresh by the device's own reports.
    async fn request_status_once(&mut self) {
        if self.status_requested || !self.transport.connected() {
            return;
        }
        match self.dispatcher.request_status().await {
            Ok(()) => {
                self.status_requested = true;
                info!("requested initial device status");
            }
            Err(e) => debug!(error = %e, "status request failed, retrying next tick"),
        }
    }

    /// Last-known relay states, for logging and tests
    pub fn relays(&self) -> &RelayStates {
        &self.relays
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }
}

/// Connect the transport and assemble the production daemon
pub fn startup(
    config: &Config,
) -> Result<(Daemon<MqttTransport, SystemClock>, JoinHandle<()>), LifecycleError> {
    let store = ScheduleStore::open(config.schedules_dir.clone())?;

    let (status_tx, status_rx) = mpsc::channel(STATUS_CHANNEL_CAPACITY);
    let (transport, pump) = MqttTransport::connect(&config.mqtt, status_tx);

    info!(
        host = %config.mqtt.host,
        port = config.mqtt.port,
        schedules = %config.schedules_dir.display(),
        "daemon assembled"
    );

    Ok((
        Daemon::new(config, store, transport, status_rx, SystemClock),
        pump,
    ))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
