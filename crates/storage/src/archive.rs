// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive partition for swept schedules
//!
//! Each sweep writes one JSON array named by the sweep timestamp. Files are
//! append-only across the system's lifetime: archived records are never
//! rewritten or deleted by the daemon.

use crate::store::StorageError;
use chrono::NaiveDateTime;
use relayd_core::Schedule;
use std::fs;
use std::path::{Path, PathBuf};

/// Write one sweep's worth of expired schedules to the archive directory
///
/// Returns the path of the file written. A second sweep inside the same
/// second gets a numeric suffix rather than clobbering the first.
pub fn write_archive(
    archive_dir: &Path,
    expired: &[Schedule],
    swept_at: NaiveDateTime,
) -> Result<PathBuf, StorageError> {
    let stamp = swept_at.format("%Y_%m_%d_%H_%M_%S");
    let mut path = archive_dir.join(format!("archive_{}.json", stamp));
    let mut attempt = 1;
    while path.exists() {
        path = archive_dir.join(format!("archive_{}_{}.json", stamp, attempt));
        attempt += 1;
    }

    let json = serde_json::to_string_pretty(expired)?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
