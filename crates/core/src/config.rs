// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration
//!
//! Loaded once at startup from a TOML file and passed by value into each
//! component's constructor; there is no ambient configuration singleton.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// MQTT broker connection and topic layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Topic the daemon publishes relay commands to
    pub command_topic: String,
    /// Topic the device publishes status reports to
    pub status_topic: String,
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub mqtt: MqttConfig,
    #[serde(default = "default_schedules_dir")]
    pub schedules_dir: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Engine tick cadence
    #[serde(with = "humantime_serde", default = "default_tick_interval")]
    pub tick_interval: Duration,
    /// Minimum spacing between reconnect attempts
    #[serde(with = "humantime_serde", default = "default_reconnect_min_interval")]
    pub reconnect_min_interval: Duration,
}

fn default_port() -> u16 {
    1883
}

fn default_client_id() -> String {
    "relayd".to_string()
}

fn default_schedules_dir() -> PathBuf {
    PathBuf::from("schedules")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_reconnect_min_interval() -> Duration {
    Duration::from_secs(2)
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
