// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-tick reconciliation algorithm
//!
//! Desired state is recomputed from scratch every tick, which makes the
//! engine self-healing: whatever a failed or skipped tick left behind is
//! fully superseded by the next one. The only state carried across ticks is
//! the previous active set, kept so a schedule that lapsed (expired,
//! disabled, or archived in the interim) can still contribute its end
//! action.

use crate::dispatch::Dispatcher;
use crate::error::EngineError;
use crate::relays::RelayStates;
use chrono::NaiveDateTime;
use relayd_core::{RelayAction, Schedule, Transport};
use relayd_storage::ScheduleStore;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// What one tick computed and did
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// Desired relay state derived from the active schedule set
    pub desired: BTreeMap<String, RelayAction>,
    /// Schedules that were active last tick but not this one
    pub ended: Vec<String>,
    /// Commands actually issued (drifted relays only, transport permitting)
    pub commands: Vec<(String, RelayAction)>,
    /// Expired schedules moved to the archive this tick
    pub archived: usize,
}

/// The reconciliation engine: tick state plus the per-tick evaluator
#[derive(Debug, Default)]
pub struct Engine {
    prev_active_ids: HashSet<String>,
    prev_active: HashMap<String, Schedule>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one reconciliation tick at `now`
    ///
    /// Steps: reload the store (it may have been edited externally), derive
    /// desired state from the active set, apply end actions for schedules
    /// that lapsed since the previous tick, dispatch the diff, then sweep
    /// expired records. End actions are resolved from the previous tick's
    /// cache *before* the sweep runs: sweeping first would archive the very
    /// records whose end action still needs applying.
    pub async fn tick<T: Transport>(
        &mut self,
        now: NaiveDateTime,
        store: &mut ScheduleStore,
        relays: &RelayStates,
        dispatcher: &mut Dispatcher<T>,
    ) -> Result<TickOutcome, EngineError> {
        store.reload();
        let active = store.active_now(now);

        // Last write wins on shared targets: `active` is ascending by start,
        // so the most recently started schedule owns a contested relay.
        let mut desired: BTreeMap<String, RelayAction> = BTreeMap::new();
        for schedule in &active {
            for target in &schedule.targets {
                desired.insert(target.clone(), schedule.start_action);
            }
        }

        let active_ids: HashSet<String> = active.iter().map(|s| s.id.clone()).collect();
        let mut ended: Vec<String> = self
            .prev_active_ids
            .difference(&active_ids)
            .cloned()
            .collect();
        ended.sort();

        for id in &ended {
            let schedule = self
                .prev_active
                .get(id)
                .cloned()
                .or_else(|| store.get(id).cloned());
            let Some(schedule) = schedule else {
                debug!(id, "ended schedule vanished without a cached record");
                continue;
            };
            // End action only for relays no still-active schedule claims
            for target in &schedule.targets {
                desired
                    .entry(target.clone())
                    .or_insert(schedule.end_action);
            }
        }

        let commands = dispatcher.dispatch(&desired, relays).await;
        if !commands.is_empty() {
            info!(count = commands.len(), "relay commands issued");
        }

        // Caches are replaced before the sweep so a sweep failure (reported
        // to the loop, retried next tick) cannot leave them stale.
        self.prev_active_ids = active_ids;
        self.prev_active = active.into_iter().map(|s| (s.id.clone(), s)).collect();

        let archived = store.sweep_expired(now)?;

        Ok(TickOutcome {
            desired,
            ended,
            commands,
            archived,
        })
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
