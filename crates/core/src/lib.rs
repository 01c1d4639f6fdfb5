// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relayd-core: Core library for the relayd relay scheduler
//!
//! This crate provides:
//! - The schedule record and relay action domain types
//! - Timestamp parsing for the persisted schedule format
//! - Clock and id-generation abstractions for testable time handling
//! - The transport capability trait the engine dispatches through
//! - Daemon configuration

pub mod clock;
pub mod config;
pub mod id;
pub mod schedule;
pub mod status;
pub mod timestamp;
pub mod transport;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError, MqttConfig};
pub use id::{CreationTimeIdGen, IdGen, SequentialIdGen};
pub use schedule::{RelayAction, Schedule, ScheduleDraft, ScheduleKind};
pub use status::{StatusEvent, StatusParseError};
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};
pub use transport::{Qos, Transport, TransportError};
