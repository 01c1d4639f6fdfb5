// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule subcommand handlers

use anyhow::{bail, Result};
use clap::Args;
use relayd_core::{
    format_timestamp, parse_timestamp, Clock, CreationTimeIdGen, RelayAction, ScheduleDraft,
    ScheduleKind, SystemClock,
};
use relayd_storage::ScheduleStore;
use std::path::Path;

#[derive(Args)]
pub struct AddArgs {
    /// Human-readable name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Relay channel key (repeatable), e.g. l1
    #[arg(long = "target", required = true)]
    pub targets: Vec<String>,

    /// Window start, "YYYY-MM-DD HH:MM[:SS]"
    #[arg(long, requires = "end", conflicts_with = "duration")]
    pub start: Option<String>,

    /// Window end, "YYYY-MM-DD HH:MM[:SS]"
    #[arg(long, requires = "start", conflicts_with = "duration")]
    pub end: Option<String>,

    /// Run for a duration starting now (e.g. 30m, 2h)
    #[arg(long = "for", value_name = "DURATION")]
    pub duration: Option<String>,

    /// Relay state while the window is active
    #[arg(long, default_value = "on")]
    pub start_action: RelayAction,

    /// Relay state applied when the window ends
    #[arg(long, default_value = "off")]
    pub end_action: RelayAction,

    /// Create the schedule disabled
    #[arg(long)]
    pub disabled: bool,
}

pub fn add(dir: &Path, args: AddArgs) -> Result<()> {
    let clock = SystemClock;
    let id_gen = CreationTimeIdGen::new();
    let mut store = ScheduleStore::open(dir)?;

    let (kind, start, end, duration_label) = match (&args.start, &args.end, &args.duration) {
        (Some(start), Some(end), None) => {
            let start_at = parse_timestamp(start)?;
            let end_at = parse_timestamp(end)?;
            if start_at > end_at {
                bail!("window start {} is after end {}", start, end);
            }
            (
                ScheduleKind::DateRange,
                format_timestamp(start_at),
                format_timestamp(end_at),
                None,
            )
        }
        (None, None, Some(spec)) => {
            let duration = humantime::parse_duration(spec)?;
            // Window is frozen here; the daemon never re-derives it
            let now = clock.now();
            let end = now + chrono::Duration::from_std(duration)?;
            (
                ScheduleKind::Duration,
                format_timestamp(now),
                format_timestamp(end),
                Some(spec.clone()),
            )
        }
        _ => bail!("provide either --start and --end, or --for"),
    };

    let schedule = store.add(
        ScheduleDraft {
            kind,
            name: args.name,
            start,
            end,
            duration_label,
            active: !args.disabled,
            targets: args.targets,
            start_action: args.start_action,
            end_action: args.end_action,
        },
        &id_gen,
        &clock,
    )?;

    println!(
        "Added {} ({} -> {})",
        schedule.id, schedule.start, schedule.end
    );
    Ok(())
}

pub fn list(dir: &Path) -> Result<()> {
    let store = ScheduleStore::open(dir)?;
    let schedules = store.all();

    if schedules.is_empty() {
        println!("No schedules.");
        return Ok(());
    }

    println!(
        "{:<4} {:<18} {:<16} {:<19} {:<19} {:<8} TARGETS",
        "IDX", "ID", "NAME", "START", "END", "STATE"
    );
    for (index, schedule) in schedules.iter().enumerate() {
        println!(
            "{:<4} {:<18} {:<16} {:<19} {:<19} {:<8} {}",
            index,
            schedule.id,
            schedule.name,
            schedule.start,
            schedule.end,
            if schedule.active { "enabled" } else { "disabled" },
            schedule.targets.join(","),
        );
    }
    Ok(())
}

pub fn remove(dir: &Path, schedule: &str) -> Result<()> {
    let mut store = ScheduleStore::open(dir)?;
    let removed = match schedule.parse::<usize>() {
        Ok(index) => store.remove_at(index)?,
        Err(_) => store.remove(schedule)?,
    };
    println!("Removed {}", removed.id);
    Ok(())
}

pub fn set_active(dir: &Path, id: &str, active: bool) -> Result<()> {
    let mut store = ScheduleStore::open(dir)?;
    store.set_active(id, active)?;
    println!("{} {}", if active { "Enabled" } else { "Disabled" }, id);
    Ok(())
}

pub fn sweep(dir: &Path) -> Result<()> {
    let mut store = ScheduleStore::open(dir)?;
    let archived = store.sweep_expired(SystemClock.now())?;
    println!("Archived {} schedule(s)", archived);
    Ok(())
}
