// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relayd-adapters: concrete transports behind the engine's capability trait
//!
//! The real adapter speaks MQTT through rumqttc; the fake records publishes
//! and scripts connectivity for tests.

pub mod mqtt;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use mqtt::MqttTransport;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, PublishedMessage};
