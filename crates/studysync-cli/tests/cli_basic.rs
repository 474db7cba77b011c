//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TODAY: &str = "2024-01-15";

fn cli(data: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studysync").unwrap();
    cmd.env("STUDYSYNC_DATA_DIR", data.path())
        .env_remove("RUST_LOG")
        .args(["--today", TODAY]);
    cmd
}

fn json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}

#[test]
fn test_priority_score() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["priority", "score", "--due", "2024-01-17", "--marks", "100", "--hours", "15"])
        .assert()
        .success()
        .stdout("high\n");
    cli(&data)
        .args(["priority", "score", "--due", "2024-01-26", "--ungraded"])
        .assert()
        .success()
        .stdout("low\n");
}

#[test]
fn test_priority_score_rejects_bad_hours() {
    let data = TempDir::new().unwrap();
    for hours in ["--hours=NaN", "--hours=0", "--hours=-4", "--hours=inf"] {
        cli(&data)
            .args(["priority", "score", "--due", "2024-01-16", hours])
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("hours_to_complete"));
    }
}

#[test]
fn test_priority_due() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["priority", "due", "2024-01-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 days overdue"));
    cli(&data)
        .args(["priority", "due", "2024-01-19", "--style", "left"])
        .assert()
        .success()
        .stdout("4 days left\n");
}

#[test]
fn test_invalid_date_is_rejected() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["priority", "score", "--due", "next tuesday"])
        .assert()
        .failure();
}

#[test]
fn test_assignment_lifecycle() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args([
            "assignment", "add", "Lab report", "--subject", "Chemistry", "--due", "2024-01-20",
            "--marks", "60", "--hours", "8",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assignment created:"));

    let output = cli(&data).args(["assignment", "list"]).output().unwrap();
    assert!(output.status.success());
    let list = json(&output.stdout);
    assert_eq!(list[0]["priority"], "high");
    let id = list[0]["id"].as_str().unwrap().to_string();

    cli(&data)
        .args(["assignment", "progress", &id, "40"])
        .assert()
        .success()
        .stdout("in-progress\n");
    cli(&data)
        .args(["assignment", "progress", &id, "140"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
    cli(&data)
        .args(["assignment", "upcoming"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 days remaining"));
}

#[test]
fn test_task_toggle() {
    let data = TempDir::new().unwrap();
    let output = cli(&data)
        .args(["task", "add", "Read chapter 4", "--subject", "History", "--priority", "high"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let id = stdout
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Task created: "))
        .unwrap()
        .to_string();

    cli(&data)
        .args(["task", "toggle", &id])
        .assert()
        .success()
        .stdout("completed\n");

    let output = cli(&data).args(["task", "list", "--completed"]).output().unwrap();
    let completed = json(&output.stdout);
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["priority"], "high");

    cli(&data).args(["task", "toggle", "missing"]).assert().failure();
}

#[test]
fn test_budget_balance() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["budget", "add", "credit", "250", "--reason", "Tutoring", "--category", "income"])
        .assert()
        .success();
    cli(&data)
        .args(["budget", "add", "debit", "40.5", "--reason", "Lunch", "--category", "food"])
        .assert()
        .success();
    cli(&data)
        .args(["budget", "add", "debit", "-3", "--reason", "Nothing"])
        .assert()
        .failure();
    cli(&data)
        .args(["budget", "balance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance:  $209.50"));
}

#[test]
fn test_search_and_summary() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["study", "log", "Mathematics", "90"])
        .assert()
        .success();
    cli(&data)
        .args([
            "timetable", "add", "--day", "mon", "--start", "10:30 AM", "--subject", "Mathematics",
            "--room", "Room 204",
        ])
        .assert()
        .success();

    cli(&data).args(["search", "m"]).assert().success().stdout("[]\n");

    let output = cli(&data).args(["search", "math"]).output().unwrap();
    let hits = json(&output.stdout);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["kind"], "schedule");

    cli(&data)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("1h 30m today"))
        .stdout(predicate::str::contains("Room 204"));
}

#[test]
fn test_config_get_set() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["config", "get", "priority.mode"])
        .assert()
        .success()
        .stdout("stored\n");
    cli(&data)
        .args(["config", "set", "priority.mode", "recompute"])
        .assert()
        .success();
    cli(&data)
        .args(["config", "get", "priority.mode"])
        .assert()
        .success()
        .stdout("recompute\n");
    cli(&data)
        .args(["config", "set", "ui.theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_outline_json() {
    let data = TempDir::new().unwrap();
    let output = cli(&data)
        .args(["outline", "Photosynthesis", "--json", "--elaborate", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let outline = json(&output.stdout);
    assert_eq!(outline["provider"], "copilot");
    assert!(outline["key_points"][0]["elaboration"].is_string());
    assert!(outline["key_points"][1].get("elaboration").is_none());

    cli(&data).args(["outline", "  "]).assert().failure();
}

#[test]
fn test_completions() {
    let data = TempDir::new().unwrap();
    cli(&data)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studysync"));
}
