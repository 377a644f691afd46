//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn run_waypoint(data_dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_waypoint");
    Command::new(bin)
        .args(args)
        .env("WAYPOINT_DATA_DIR", data_dir)
        .env_remove("WAYPOINT_STORE_URL")
        .env_remove("WAYPOINT_USER_ID")
        .env_remove("WAYPOINT_RECORD")
        .output()
        .expect("failed to run waypoint binary")
}

fn data_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("waypoint_cli_{test}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn seed(dir: &Path) {
    let tasks = r#"[
        {"_id": "t1", "taskTitle": "Pick schools", "applicationGuidanceId": "g1"},
        {"_id": "t2", "taskTitle": "Draft essay", "dueDate": "2025-11-30"}
    ]"#;
    let guidance = r#"[
        {"_id": "g1", "stageName": "Research", "stepTitle": "Build a shortlist",
         "sequenceNumber": 1, "actionableToDos": "List 10 schools\nCheck deadlines"}
    ]"#;
    let universities = r#"[
        {"_id": "u-1", "universityName": "TU Munich", "location": "Germany", "estimatedBudget": 3000},
        {"_id": "u-2", "universityName": "McGill", "location": "Canada", "estimatedBudget": 50000}
    ]"#;
    std::fs::write(dir.join("applicationtasks.json"), tasks).unwrap();
    std::fs::write(dir.join("applicationguidance.json"), guidance).unwrap();
    std::fs::write(dir.join("universities.json"), universities).unwrap();
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let dir = data_dir("help");
    let output = run_waypoint(&dir, &["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("tasks"));
    assert!(out.contains("toggle"));
    assert!(out.contains("universities"));
}

#[test]
fn unknown_subcommand_fails() {
    let dir = data_dir("unknown");
    let output = run_waypoint(&dir, &["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn tasks_without_user_explains_how_to_set_one() {
    let dir = data_dir("no_user");
    let output = run_waypoint(&dir, &["tasks"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--user"));
}

#[test]
fn toggle_persists_progress_between_runs() {
    let dir = data_dir("toggle");
    seed(&dir);

    let output = run_waypoint(&dir, &["--user", "u1", "tasks"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0 of 2 tasks completed (0%)"));

    let output = run_waypoint(&dir, &["--user", "u1", "toggle", "t1"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Completed: Pick schools"));
    assert!(out.contains("1 of 2 tasks completed (50%)"));

    let output = run_waypoint(&dir, &["--user", "u1", "tasks", "--stage", "Research"]);
    assert!(stdout(&output).contains("[x] t1  Pick schools"));

    let output = run_waypoint(&dir, &["--user", "u1", "toggle", "t1"]);
    assert!(stdout(&output).contains("Reopened: Pick schools"));

    let progress = std::fs::read_to_string(dir.join("usertaskprogress.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&progress).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["_id"], "progress-t1-u1");
    assert_eq!(records[0]["isCompleted"], false);
}

#[test]
fn toggle_of_unknown_task_fails() {
    let dir = data_dir("unknown_task");
    seed(&dir);
    let output = run_waypoint(&dir, &["--user", "u1", "toggle", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown task: nope"));
}

#[test]
fn guidance_lists_steps_and_action_items() {
    let dir = data_dir("guidance");
    seed(&dir);
    let output = run_waypoint(&dir, &["guidance"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("== Research =="));
    assert!(out.contains("1. Build a shortlist"));
    assert!(out.contains("[ ] Check deadlines"));
}

#[test]
fn universities_filter_by_budget_and_show_one() {
    let dir = data_dir("universities");
    seed(&dir);
    let output = run_waypoint(&dir, &["universities", "--budget", "under-30k"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("1 university found"));
    assert!(out.contains("TU Munich"));
    assert!(!out.contains("McGill"));

    let output = run_waypoint(&dir, &["university", "u-2"]);
    assert!(stdout(&output).contains("Location: Canada"));

    let output = run_waypoint(&dir, &["university", "u-9"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("University u-9 not found"));
}

#[test]
fn recorded_session_replays_without_a_store() {
    let dir = data_dir("record");
    seed(&dir);
    let cassette = dir.join("tasks.cassette.yaml");

    let bin = env!("CARGO_BIN_EXE_waypoint");
    let recorded = Command::new(bin)
        .args(["--user", "u1", "tasks"])
        .env("WAYPOINT_DATA_DIR", &dir)
        .env("WAYPOINT_RECORD", &cassette)
        .env_remove("WAYPOINT_STORE_URL")
        .output()
        .unwrap();
    assert!(recorded.status.success());
    assert!(cassette.exists());

    let empty = data_dir("record_empty");
    let cassette_arg = cassette.to_string_lossy().into_owned();
    let replayed = run_waypoint(&empty, &["--user", "u1", "--replay", &cassette_arg, "tasks"]);
    assert!(replayed.status.success());
    assert_eq!(stdout(&replayed), stdout(&recorded));
}
