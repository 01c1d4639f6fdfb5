// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule records and relay actions
//!
//! A schedule maps a time window to an action on a set of relay channels.
//! Records are persisted as JSON with the historical field names, so legacy
//! records missing `targets`/`start_action`/`end_action` deserialize with
//! defaults instead of failing the whole file.

use crate::timestamp::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The state a schedule forces on its target relays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayAction {
    On,
    Off,
}

impl fmt::Display for RelayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayAction::On => write!(f, "on"),
            RelayAction::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for RelayAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(RelayAction::On),
            "off" => Ok(RelayAction::Off),
            _ => Err(format!("unknown relay action: {}", s)),
        }
    }
}

/// How a schedule's window was authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// Window computed from creation time plus a duration, then frozen
    Duration,
    /// Window carries user-picked absolute bounds
    DateRange,
}

/// A user-authored rule mapping a time window to a relay action
///
/// `start`, `end`, and `created_at` are kept as raw strings: a record with an
/// unparsable timestamp stays inert in the live store (never evaluated, never
/// archived) instead of poisoning the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub kind: ScheduleKind,
    #[serde(default)]
    pub name: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub duration_label: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default = "default_start_action")]
    pub start_action: RelayAction,
    #[serde(default = "default_end_action")]
    pub end_action: RelayAction,
    #[serde(default)]
    pub created_at: String,
}

fn default_start_action() -> RelayAction {
    RelayAction::On
}

fn default_end_action() -> RelayAction {
    RelayAction::Off
}

impl Schedule {
    /// Parsed start of the active window, if well-formed
    pub fn start_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.start).ok()
    }

    /// Parsed end of the active window, if well-formed
    pub fn end_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.end).ok()
    }

    /// Whether this schedule should be evaluated at `now`
    ///
    /// Requires the enable flag, parsable bounds, and `now` inside
    /// `[start, end]`. A record with `start > end` never matches.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        if !self.active {
            return false;
        }
        match (self.start_at(), self.end_at()) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        }
    }
}

/// Fields the authoring surface supplies; the store assigns id and created_at
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub kind: ScheduleKind,
    pub name: String,
    pub start: String,
    pub end: String,
    pub duration_label: Option<String>,
    pub active: bool,
    pub targets: Vec<String>,
    pub start_action: RelayAction,
    pub end_action: RelayAction,
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
