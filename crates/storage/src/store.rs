// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The live schedule store
//!
//! A flat JSON array in `schedules.json`, reloaded at the top of every tick
//! because the authoring surface writes the same file between ticks. Missing
//! or corrupt content yields an empty collection: first run and corruption are
//! both non-fatal, only the directory being uncreatable aborts startup.

use crate::archive;
use chrono::NaiveDateTime;
use relayd_core::{format_timestamp, Clock, IdGen, Schedule, ScheduleDraft};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schedule not found: {0}")]
    NotFound(String),
    #[error("index {index} out of range (store has {len} schedules)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Durable collection of schedule records
pub struct ScheduleStore {
    file_path: PathBuf,
    archive_dir: PathBuf,
    schedules: Vec<Schedule>,
}

impl ScheduleStore {
    /// Open (and create if necessary) a store rooted at the given directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let archive_dir = dir.join("archive");
        fs::create_dir_all(&archive_dir)?;

        let mut store = Self {
            file_path: dir.join("schedules.json"),
            archive_dir,
            schedules: Vec::new(),
        };
        store.reload();
        Ok(store)
    }

    /// Re-read the live file, replacing the in-memory collection
    ///
    /// Missing and corrupt files both resolve to an empty collection.
    pub fn reload(&mut self) {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "no schedule file yet");
            self.schedules = Vec::new();
            return;
        }
        match fs::read_to_string(&self.file_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(schedules) => self.schedules = schedules,
                Err(e) => {
                    warn!(path = %self.file_path.display(), error = %e,
                        "schedule file is corrupt, continuing with empty store");
                    self.schedules = Vec::new();
                }
            },
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e,
                    "failed to read schedule file, continuing with empty store");
                self.schedules = Vec::new();
            }
        }
    }

    /// Persist the full collection, replacing prior durable content
    ///
    /// Writes to a sibling temp file and renames over the live file so a
    /// crash mid-write cannot leave a half-written store behind.
    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.schedules)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }

    /// Create a schedule from a draft: assign id and creation time, persist,
    /// and return the stored record
    pub fn add(
        &mut self,
        draft: ScheduleDraft,
        id_gen: &impl IdGen,
        clock: &impl Clock,
    ) -> Result<Schedule, StorageError> {
        let schedule = Schedule {
            id: id_gen.next(),
            kind: draft.kind,
            name: draft.name,
            start: draft.start,
            end: draft.end,
            duration_label: draft.duration_label,
            active: draft.active,
            targets: draft.targets,
            start_action: draft.start_action,
            end_action: draft.end_action,
            created_at: format_timestamp(clock.now()),
        };
        self.schedules.push(schedule.clone());
        self.save()?;
        info!(id = %schedule.id, name = %schedule.name, "schedule added");
        Ok(schedule)
    }

    /// Remove a schedule by id and persist
    pub fn remove(&mut self, id: &str) -> Result<Schedule, StorageError> {
        let index = self
            .schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        let removed = self.schedules.remove(index);
        self.save()?;
        info!(id = %removed.id, "schedule removed");
        Ok(removed)
    }

    /// Remove a schedule by position and persist
    ///
    /// An out-of-range index is an error and performs no mutation.
    pub fn remove_at(&mut self, index: usize) -> Result<Schedule, StorageError> {
        if index >= self.schedules.len() {
            return Err(StorageError::IndexOutOfRange {
                index,
                len: self.schedules.len(),
            });
        }
        let removed = self.schedules.remove(index);
        self.save()?;
        info!(id = %removed.id, index, "schedule removed");
        Ok(removed)
    }

    /// Toggle the enable flag and persist
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<(), StorageError> {
        let schedule = self
            .schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        schedule.active = active;
        self.save()?;
        info!(id, active, "schedule enable flag updated");
        Ok(())
    }

    /// Look up a schedule by id
    pub fn get(&self, id: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// All live schedules in storage order
    pub fn all(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Schedules enabled and inside their window at `now`, ascending by start
    ///
    /// The sort is stable: two schedules with an equal start keep their
    /// storage order. Records with unparsable bounds never match.
    pub fn active_now(&self, now: NaiveDateTime) -> Vec<Schedule> {
        let mut active: Vec<Schedule> = self
            .schedules
            .iter()
            .filter(|s| s.is_active_at(now))
            .cloned()
            .collect();
        active.sort_by_key(|s| s.start_at());
        active
    }

    /// Move schedules whose end has passed into a timestamped archive file
    ///
    /// Records with an unparsable `end` are kept, not archived, so malformed
    /// input is never silently dropped. If the archive write fails the live
    /// set is left untouched and the sweep retries on a later tick. Returns
    /// the number of schedules archived.
    pub fn sweep_expired(&mut self, now: NaiveDateTime) -> Result<usize, StorageError> {
        let (kept, expired): (Vec<Schedule>, Vec<Schedule>) = self
            .schedules
            .iter()
            .cloned()
            .partition(|s| s.end_at().is_none_or(|end| end > now));

        if expired.is_empty() {
            return Ok(0);
        }

        let archive_path = archive::write_archive(&self.archive_dir, &expired, now)?;
        self.schedules = kept;
        self.save()?;
        info!(
            count = expired.len(),
            archive = %archive_path.display(),
            "expired schedules archived"
        );
        Ok(expired.len())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
