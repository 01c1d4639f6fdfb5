// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relayctl - schedule authoring CLI
//!
//! Edits the same `schedules.json` the daemon reconciles against; the daemon
//! reloads the file every tick, so changes land within one tick interval and
//! no IPC is needed.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use relayd_core::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relayctl", version, about = "Manage relayd schedules")]
struct Cli {
    /// Daemon config file to take the schedules directory from
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Schedules directory (overrides the config file)
    #[arg(long, global = true)]
    schedules_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a schedule
    Add(commands::AddArgs),
    /// List live schedules
    List,
    /// Remove a schedule by id or list position
    Remove {
        /// Schedule id (prog_...) or zero-based position from `list`
        schedule: String,
    },
    /// Enable a schedule
    Enable {
        /// Schedule id
        id: String,
    },
    /// Disable a schedule without removing it
    Disable {
        /// Schedule id
        id: String,
    },
    /// Archive expired schedules now
    Sweep,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = schedules_dir(&cli)?;

    match cli.command {
        Commands::Add(args) => commands::add(&dir, args),
        Commands::List => commands::list(&dir),
        Commands::Remove { schedule } => commands::remove(&dir, &schedule),
        Commands::Enable { id } => commands::set_active(&dir, &id, true),
        Commands::Disable { id } => commands::set_active(&dir, &id, false),
        Commands::Sweep => commands::sweep(&dir),
    }
}

/// Resolution order: explicit flag, config file, then the daemon's default
fn schedules_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.schedules_dir {
        return Ok(dir.clone());
    }
    if let Some(config_path) = &cli.config {
        let config = Config::load(config_path)?;
        return Ok(config.schedules_dir);
    }
    Ok(PathBuf::from("schedules"))
}
