// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions
//!
//! Schedule ids are `prog_<epoch-millis>` for compatibility with the persisted
//! record format. The production generator bumps past the last issued value so
//! two schedules created within the same millisecond still get distinct ids.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates unique schedule identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Creation-time-based ID generator for production use
#[derive(Clone, Default)]
pub struct CreationTimeIdGen {
    last: Arc<AtomicU64>,
}

impl CreationTimeIdGen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGen for CreationTimeIdGen {
    fn next(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        // Monotonic within the process even if the wall clock stalls or steps back
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = millis.max(prev + 1);
            match self
                .last
                .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return format!("prog_{}", candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Sequential ID generator for testing
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("prog")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", self.prefix, n)
    }
}
