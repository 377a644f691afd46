//! Record-replay round-trip integration test.
//!
//! Records a board load plus a toggle against an in-memory store, then
//! replays the cassette with no store at all and checks that the board
//! ends up in the same state every time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use waypoint::adapters::local::MemoryStore;
use waypoint::cassette::format::Cassette;
use waypoint::context::ServiceContext;
use waypoint::model::{GUIDANCE, PROGRESS, TASKS};
use waypoint::ports::Clock;
use waypoint::tracker::{TaskBoard, ToggleOutcome, UserTaskView};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn cassette_path(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("waypoint_record_replay_{test}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("session.cassette.yaml")
}

fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::new()
            .with_collection(
                TASKS,
                vec![
                    json!({"_id": "t1", "taskTitle": "Pick schools", "applicationGuidanceId": "g1"}),
                    json!({"_id": "t2", "taskTitle": "Draft essay"}),
                ],
            )
            .with_collection(
                PROGRESS,
                vec![json!({"_id": "p1", "userId": "u1", "taskId": "t1", "isCompleted": true})],
            )
            .with_collection(GUIDANCE, vec![json!({"_id": "g1", "stageName": "Research"})]),
    )
}

/// Loads the board and toggles t2, returning what the session saw.
async fn exercise(ctx: &ServiceContext) -> (ToggleOutcome, Vec<UserTaskView>) {
    let mut board = TaskBoard::new("u1", 50);
    board.load(ctx).await.unwrap();
    let outcome = board.toggle(ctx, "t2").await.unwrap();
    (outcome, board.tasks().to_vec())
}

async fn record(path: &Path) -> (ToggleOutcome, Vec<UserTaskView>) {
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 0).unwrap());
    let ctx = ServiceContext::recording(Box::new(clock), Box::new(seeded_store()), path);
    exercise(&ctx).await
}

#[tokio::test]
async fn record_then_replay_produces_identical_outputs() {
    let path = cassette_path("roundtrip");

    // --- Phase 1: record; the cassette is written when the context drops ---
    let (recorded_outcome, recorded_views) = record(&path).await;
    assert!(path.exists(), "cassette should be written on drop");

    // 3 bulk reads, the existence check, the create, and the clock reading.
    let cassette = Cassette::load(&path).unwrap();
    assert_eq!(cassette.interactions.len(), 6);
    assert_eq!(cassette.name, "session");

    // --- Phase 2: replay and verify identical outputs ---
    let ctx1 = ServiceContext::replaying(&path).unwrap();
    let (outcome1, views1) = exercise(&ctx1).await;
    assert_eq!(outcome1, recorded_outcome, "toggle outcome replay mismatch");
    assert_eq!(views1, recorded_views, "board replay mismatch");

    // --- Phase 3: replay a second time, determinism check ---
    let ctx2 = ServiceContext::replaying(&path).unwrap();
    let (outcome2, views2) = exercise(&ctx2).await;
    assert_eq!(outcome1, outcome2, "determinism: outcomes differ between replays");
    assert_eq!(views1, views2, "determinism: views differ between replays");

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn replayed_store_errors_surface_as_errors() {
    let path = cassette_path("store_error");
    let store = seeded_store();
    store.set_fail_reads(true);
    {
        let ctx = ServiceContext::recording(
            Box::new(FixedClock(Utc::now())),
            Box::new(Arc::clone(&store)),
            &path,
        );
        let mut board = TaskBoard::new("u1", 50);
        assert!(board.load(&ctx).await.is_err());
    }

    let ctx = ServiceContext::replaying(&path).unwrap();
    let mut board = TaskBoard::new("u1", 50);
    let err = board.load(&ctx).await.unwrap_err();
    assert!(err.to_string().contains(TASKS));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
#[should_panic(expected = "Cassette exhausted")]
async fn replaying_past_the_end_panics() {
    let path = cassette_path("exhausted");
    let _ = record(&path).await;

    let ctx = ServiceContext::replaying(&path).unwrap();
    let (_, _) = exercise(&ctx).await;
    // The cassette holds exactly one session; a second load has nothing left.
    let mut board = TaskBoard::new("u1", 50);
    let _ = board.load(&ctx).await;
}
