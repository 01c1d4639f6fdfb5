//! Shared harness for scheduler specs

use relayd_adapters::FakeTransport;
use relayd_core::{
    parse_timestamp, Clock, FakeClock, RelayAction, ScheduleDraft, ScheduleKind, SequentialIdGen,
    StatusEvent,
};
use relayd_engine::{Dispatcher, Engine, RelayStates, TickOutcome};
use relayd_storage::ScheduleStore;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub use relayd_core::RelayAction::{Off, On};

/// A scheduler wired to a temp directory and a fake broker
pub struct Scheduler {
    tmp: TempDir,
    pub store: ScheduleStore,
    pub transport: FakeTransport,
    pub relays: RelayStates,
    dispatcher: Dispatcher<FakeTransport>,
    engine: Engine,
    id_gen: SequentialIdGen,
    clock: FakeClock,
}

impl Scheduler {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let store = ScheduleStore::open(tmp.path().join("schedules")).unwrap();
        let transport = FakeTransport::new();
        let dispatcher = Dispatcher::new(transport.clone(), "device/cmd", Duration::from_secs(2));
        Self {
            tmp,
            store,
            transport,
            relays: RelayStates::new(),
            dispatcher,
            engine: Engine::new(),
            id_gen: SequentialIdGen::new("prog"),
            clock: FakeClock::at(parse_timestamp("2026-01-10 00:00:00").unwrap()),
        }
    }

    /// Add an enabled on/off schedule over the given window
    pub fn add(&mut self, name: &str, start: &str, end: &str, targets: &[&str]) -> String {
        self.add_with_actions(name, start, end, targets, On, Off)
    }

    pub fn add_with_actions(
        &mut self,
        name: &str,
        start: &str,
        end: &str,
        targets: &[&str],
        start_action: RelayAction,
        end_action: RelayAction,
    ) -> String {
        let added = self
            .store
            .add(
                ScheduleDraft {
                    kind: ScheduleKind::DateRange,
                    name: name.to_string(),
                    start: start.to_string(),
                    end: end.to_string(),
                    duration_label: None,
                    active: true,
                    targets: targets.iter().map(|t| t.to_string()).collect(),
                    start_action,
                    end_action,
                },
                &self.id_gen,
                &self.clock,
            )
            .unwrap();
        added.id
    }

    /// Replace the live file wholesale, bypassing the store API
    pub fn write_raw(&self, json: &str) {
        std::fs::write(self.tmp.path().join("schedules/schedules.json"), json).unwrap();
    }

    /// Run one tick at the given wall-clock time
    pub async fn tick(&mut self, now: &str) -> TickOutcome {
        self.clock.set(parse_timestamp(now).unwrap());
        self.engine
            .tick(
                self.clock.now(),
                &mut self.store,
                &self.relays,
                &mut self.dispatcher,
            )
            .await
            .unwrap()
    }

    /// Feed a device status report into the relay mirror
    pub fn device_reports(&mut self, json: &[u8]) {
        self.relays.apply(&StatusEvent::parse(json).unwrap());
    }

    /// Payloads published since the last clear, in order
    pub fn sent(&self) -> Vec<String> {
        self.transport
            .published()
            .iter()
            .map(|m| m.payload_str())
            .collect()
    }

    pub fn clear_sent(&self) {
        self.transport.clear_published();
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.tmp.path().join("schedules/archive")
    }
}
