// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relayd: MQTT relay channel scheduler daemon
//!
//! Wakes once per tick interval, reconciles relay state against the live
//! schedule store, and shuts down cleanly on SIGTERM/SIGINT.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;

use std::path::PathBuf;

use relayd_core::Config;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::lifecycle::LifecycleError;

const DEFAULT_CONFIG_PATH: &str = "relayd.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = Config::load(&config_path)?;
    let _log_guard = setup_logging(&config)?;

    info!(config = %config_path.display(), "starting relayd");

    let (mut daemon, pump) = lifecycle::startup(&config)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let mut ticker = tokio::time::interval(config.tick_interval);
    // A stalled tick (slow fs, broker timeout) must not cause a burst after
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match daemon.tick().await {
                    Ok(outcome) => {
                        if !outcome.commands.is_empty() || outcome.archived > 0 {
                            debug!(
                                commands = outcome.commands.len(),
                                archived = outcome.archived,
                                "tick complete"
                            );
                        }
                    }
                    // Next tick recomputes from scratch, so keep running
                    Err(e) => error!(error = %e, "tick failed"),
                }
            }

            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }

            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    pump.abort();
    info!("daemon stopped");
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(&config.log_dir)?;

    // One file per day, matching the dated log layout operators expect
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "relayd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
