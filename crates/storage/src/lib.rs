// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relayd-storage: durable schedule collection
//!
//! Owns `schedules.json` (the live store) and the append-only `archive/`
//! directory expired schedules are swept into.

pub mod archive;
pub mod store;

pub use archive::write_archive;
pub use store::{ScheduleStore, StorageError};
