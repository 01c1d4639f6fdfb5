//! Schedule lifecycle specs
//!
//! A window opens, the relay turns on; the window closes, the relay turns
//! off and the record is archived.

use crate::prelude::*;

#[tokio::test]
async fn relay_follows_the_schedule_window() {
    let mut s = Scheduler::new();
    s.add("morning", "2026-01-10 10:00:00", "2026-01-10 10:05:00", &["l1"]);

    // Before the window: nothing to do
    let outcome = s.tick("2026-01-10 09:59:00").await;
    assert!(outcome.commands.is_empty());

    // Inside the window: turn l1 on
    s.tick("2026-01-10 10:02:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#]);
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    // Still inside, device confirmed: stay quiet
    s.tick("2026-01-10 10:03:00").await;
    assert!(s.sent().is_empty());

    // Past the window: turn l1 off and archive the record
    let outcome = s.tick("2026-01-10 10:06:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"off"}"#]);
    assert_eq!(outcome.archived, 1);
    assert!(s.store.all().is_empty());

    let archives: Vec<_> = std::fs::read_dir(s.archive_dir()).unwrap().collect();
    assert_eq!(archives.len(), 1);
}

#[tokio::test]
async fn window_bounds_are_inclusive() {
    let mut s = Scheduler::new();
    s.add("exact", "2026-01-10 10:00:00", "2026-01-10 10:05:00", &["l1"]);

    s.tick("2026-01-10 10:00:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#]);
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    // The end bound itself is still inside the window, so no off command
    // yet; the sweep on the same tick already files the record away.
    let outcome = s.tick("2026-01-10 10:05:00").await;
    assert!(s.sent().is_empty());
    assert_eq!(outcome.archived, 1);

    // The next tick applies the end action from the previous tick's cache,
    // even though the record is already archived.
    s.tick("2026-01-10 10:05:01").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"off"}"#]);
}

#[tokio::test]
async fn relay_is_recommanded_if_the_device_drifts() {
    let mut s = Scheduler::new();
    s.add("morning", "2026-01-10 10:00:00", "2026-01-10 11:00:00", &["l1"]);

    s.tick("2026-01-10 10:02:00").await;
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    // Someone flips the relay off at the device
    s.device_reports(br#"{"l1":"off"}"#);
    s.tick("2026-01-10 10:10:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#]);
}

#[tokio::test]
async fn multi_target_schedule_commands_each_relay() {
    let mut s = Scheduler::new();
    s.add("both", "2026-01-10 10:00:00", "2026-01-10 11:00:00", &["l1", "l2"]);

    s.tick("2026-01-10 10:30:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#, r#"{"l2":"on"}"#]);
}

#[tokio::test]
async fn inverted_schedules_never_fire() {
    let mut s = Scheduler::new();
    s.add("inverted", "2026-01-10 11:00:00", "2026-01-10 10:00:00", &["l1"]);

    let outcome = s.tick("2026-01-10 10:30:00").await;
    assert!(outcome.commands.is_empty());
    // Sweep treats the inverted end as expired; the record is archived
    assert_eq!(outcome.archived, 1);
}
