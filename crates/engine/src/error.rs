// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use thiserror::Error;

/// Errors surfaced by a reconciliation tick
///
/// The scheduler loop logs these and keeps ticking; desired state is
/// recomputed from scratch next tick, so a failed tick is fully superseded.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] relayd_storage::StorageError),
}
