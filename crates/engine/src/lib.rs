// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relayd-engine: per-tick schedule reconciliation
//!
//! Each tick derives the desired relay state from the active schedule set,
//! detects schedules that lapsed since the previous tick, and emits the
//! minimal set of commands needed to correct drift.

pub mod dispatch;
pub mod error;
pub mod reconcile;
pub mod relays;

pub use dispatch::Dispatcher;
pub use error::EngineError;
pub use reconcile::{Engine, TickOutcome};
pub use relays::RelayStates;
