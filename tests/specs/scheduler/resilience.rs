//! Degraded-mode specs
//!
//! Broker outages, corrupt stores, and malformed records must never stop
//! the tick loop; desired state is recomputed fresh each tick, so recovery
//! is automatic.

use crate::prelude::*;

#[tokio::test]
async fn commands_resume_when_the_broker_returns() {
    let mut s = Scheduler::new();
    s.add("morning", "2026-01-10 10:00:00", "2026-01-10 11:00:00", &["l1"]);

    s.transport.set_connected(false);
    s.transport.set_reconnect_succeeds(false);

    // Outage: the tick's commands are dropped, nothing is queued
    let outcome = s.tick("2026-01-10 10:02:00").await;
    assert!(outcome.commands.is_empty());
    assert!(s.sent().is_empty());

    // Session comes back: the next tick recomputes and delivers
    s.transport.set_connected(true);
    s.tick("2026-01-10 10:03:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#]);
}

#[tokio::test]
async fn a_corrupt_store_is_treated_as_empty() {
    let mut s = Scheduler::new();
    s.add("morning", "2026-01-10 10:00:00", "2026-01-10 11:00:00", &["l1"]);
    s.write_raw("{ this is not json");

    let outcome = s.tick("2026-01-10 10:02:00").await;

    assert!(outcome.commands.is_empty());
    assert!(s.store.all().is_empty());
}

#[tokio::test]
async fn a_malformed_timestamp_keeps_the_record_inert() {
    let mut s = Scheduler::new();
    s.write_raw(
        r#"[
            {
                "id": "prog_1",
                "kind": "DateRange",
                "start": "not-a-timestamp",
                "end": "2026-01-10 11:00:00",
                "active": true,
                "targets": ["l1"]
            },
            {
                "id": "prog_2",
                "kind": "DateRange",
                "start": "2026-01-10 10:00:00",
                "end": "2026-01-10 11:00:00",
                "active": true,
                "targets": ["l2"]
            }
        ]"#,
    );

    let outcome = s.tick("2026-01-10 10:30:00").await;

    // Only the well-formed record fires; the malformed one is neither
    // evaluated nor archived
    assert_eq!(s.sent(), vec![r#"{"l2":"on"}"#]);
    assert_eq!(outcome.archived, 0);
    assert_eq!(s.store.all().len(), 2);
}

#[tokio::test]
async fn legacy_records_default_to_on_off_actions() {
    let mut s = Scheduler::new();
    s.write_raw(
        r#"[
            {
                "id": "prog_1",
                "kind": "DateRange",
                "start": "2026-01-10 10:00:00",
                "end": "2026-01-10 10:30:00",
                "active": true,
                "targets": ["l1"]
            }
        ]"#,
    );

    s.tick("2026-01-10 10:15:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"on"}"#]);
    s.device_reports(br#"{"l1":"on"}"#);
    s.clear_sent();

    s.tick("2026-01-10 10:31:00").await;
    assert_eq!(s.sent(), vec![r#"{"l1":"off"}"#]);
}
