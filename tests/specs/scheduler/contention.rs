//! Overlapping-schedule specs
//!
//! When several schedules claim the same relay, the most recently started
//! one wins; end actions never override a still-active claimant.

use crate::prelude::*;

#[tokio::test]
async fn most_recently_started_schedule_owns_the_relay() {
    let mut s = Scheduler::new();
    s.add_with_actions(
        "early-on",
        "2026-01-10 10:00:00",
        "2026-01-10 12:00:00",
        &["l1"],
        On,
        Off,
    );
    s.add_with_actions(
        "late-off",
        "2026-01-10 10:30:00",
        "2026-01-10 12:00:00",
        &["l1"],
        Off,
        Off,
    );

    // Only the early schedule has started
    s.tick("2026-01-10 10:15:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#]);
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    // The later start takes the relay over
    s.tick("2026-01-10 10:45:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"off"}"#]);
}

#[tokio::test]
async fn expiring_schedule_leaves_an_active_claimants_relay_alone() {
    let mut s = Scheduler::new();
    s.add("short", "2026-01-10 10:00:00", "2026-01-10 10:30:00", &["l1"]);
    s.add("long", "2026-01-10 10:00:00", "2026-01-10 12:00:00", &["l1"]);

    s.tick("2026-01-10 10:15:00").await;
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    // "short" expires, but "long" still wants l1 on
    let outcome = s.tick("2026-01-10 10:31:00").await;
    assert!(s.sent().is_empty());
    assert_eq!(outcome.archived, 1);
    assert_eq!(s.store.all().len(), 1);
}

#[tokio::test]
async fn end_action_applies_to_unclaimed_relays_only() {
    let mut s = Scheduler::new();
    s.add("both", "2026-01-10 10:00:00", "2026-01-10 10:30:00", &["l1", "l2"]);
    s.add("keeper", "2026-01-10 10:00:00", "2026-01-10 12:00:00", &["l2"]);

    s.tick("2026-01-10 10:15:00").await;
    s.device_reports(br#"{"l1":"on","l2":"on"}"#);
    s.clear_sent();

    // l1 is released and turned off; l2 stays claimed by "keeper"
    s.tick("2026-01-10 10:31:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"off"}"#]);
}

#[tokio::test]
async fn disabling_mid_window_releases_the_relay() {
    let mut s = Scheduler::new();
    let id = s.add("toggled", "2026-01-10 10:00:00", "2026-01-10 12:00:00", &["l1"]);

    s.tick("2026-01-10 10:15:00").await;
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    s.store.set_active(&id, false).unwrap();
    let outcome = s.tick("2026-01-10 10:16:00").await;

    assert_eq!(s.sent(), vec![r#"{"l1":"off"}"#]);
    // Disabled is not expired: the record stays live for re-enabling
    assert_eq!(outcome.archived, 0);
    assert!(s.store.get(&id).is_some());
}
