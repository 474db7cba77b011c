//! Integration tests for the workspace shell.
//!
//! These tests drive a workspace through the public API the CLI uses,
//! persist it through a snapshot and reopen it.

use chrono::{Duration, NaiveDate, Weekday};
use studysync_core::budget::{BudgetCategory, NewTransaction, TransactionKind};
use studysync_core::notes::{EditorKind, NewNote};
use studysync_core::search::ResultKind;
use studysync_core::study::{NewStudySession, SessionKind};
use studysync_core::timetable::{parse_clock_time, NewClassSlot};
use studysync_core::{
    Config, Event, FixedClock, NewAssignment, NewTask, PriorityMode, PriorityTier, Snapshot,
    Workspace, WorkspaceData,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn open(data: WorkspaceData, config: Config, today: NaiveDate) -> Workspace {
    Workspace::with_data(data, config, Box::new(FixedClock::on(today)))
}

fn seed(ws: &mut Workspace) {
    let today = ws.today();
    ws.add_assignment(
        NewAssignment::new("Calculus problem set", "Mathematics", today + Duration::days(2))
            .with_hours(15.0),
    )
    .unwrap();
    ws.add_assignment(
        NewAssignment::new("History reading", "History", today + Duration::days(10))
            .with_marks(40)
            .with_hours(5.0),
    )
    .unwrap();
    ws.add_task(
        NewTask::new("Buy lab goggles", "Chemistry", today).with_priority(PriorityTier::Low),
    )
    .unwrap();
    ws.add_transaction(NewTransaction {
        date: today,
        amount: 500.0,
        kind: TransactionKind::Credit,
        reason: "Part-time job".to_string(),
        category: BudgetCategory::Income,
    })
    .unwrap();
    ws.add_transaction(NewTransaction {
        date: today,
        amount: 120.5,
        kind: TransactionKind::Debit,
        reason: "Textbooks".to_string(),
        category: BudgetCategory::Books,
    })
    .unwrap();
    ws.log_session(NewStudySession {
        subject: "Mathematics".to_string(),
        duration_minutes: 120,
        date: today,
        notes: String::new(),
        kind: SessionKind::Focused,
    })
    .unwrap();
    ws.add_class(NewClassSlot {
        day: Weekday::Mon,
        start: parse_clock_time("10:30 AM").unwrap(),
        subject: "Mathematics".to_string(),
        room: "Room 204".to_string(),
        color: String::new(),
        duration_minutes: 90,
    })
    .unwrap();
    ws.add_note(NewNote {
        title: "Math limits cheat sheet".to_string(),
        subject: "Mathematics".to_string(),
        content: "epsilon-delta".to_string(),
        date: today,
        editor: EditorKind::Plain,
        external_link: None,
    })
    .unwrap();
}

#[test]
fn test_dashboard_after_seeding() {
    let mut ws = open(WorkspaceData::default(), Config::default(), monday());
    seed(&mut ws);

    let events = ws.take_events();
    assert_eq!(events.len(), 8);
    assert!(matches!(events[0], Event::AssignmentAdded { priority: PriorityTier::High, .. }));

    let summary = ws.summary();
    assert_eq!(summary.active_tasks, 1);
    assert_eq!(summary.balance, 379.5);
    assert_eq!(summary.today_study_minutes, 120);
    assert_eq!(summary.todays_classes.len(), 1);
    assert_eq!(summary.upcoming_assignments.len(), 1);
    assert_eq!(summary.upcoming_assignments[0].dueness, "2 days remaining");

    let ordered: Vec<&str> = ws
        .assignments_by_priority()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(ordered, ["Calculus problem set", "History reading"]);
}

#[test]
fn test_search_spans_stores() {
    let mut ws = open(WorkspaceData::default(), Config::default(), monday());
    seed(&mut ws);

    let kinds: Vec<ResultKind> = ws.search("math").iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [ResultKind::Assignment, ResultKind::Schedule, ResultKind::Note]
    );
    assert!(ws.search("m").is_empty());

    let budget = ws.search("supplies");
    assert_eq!(budget.len(), 1);
    assert_eq!(budget[0].kind, ResultKind::Budget);
}

#[test]
fn test_snapshot_reopen_and_recompute() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = Snapshot::new(dir.path().join("workspace.json"));

    let mut ws = open(WorkspaceData::default(), Config::default(), monday());
    seed(&mut ws);
    snapshot.save(ws.data()).unwrap();

    // Eight days later the history reading is due in two days.
    let later = monday() + Duration::days(8);
    let data = snapshot.load().unwrap();
    let reading_id = data
        .assignments
        .list()
        .iter()
        .find(|a| a.subject == "History")
        .unwrap()
        .id
        .clone();

    let stored = open(data.clone(), Config::default(), later);
    assert_eq!(stored.assignment_priority(&reading_id).unwrap(), PriorityTier::Low);
    let hits = stored.search("history reading");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].priority, Some(PriorityTier::Low));

    let mut config = Config::default();
    config.set("priority.mode", "recompute").unwrap();
    assert_eq!(config.priority.mode, PriorityMode::Recompute);
    let recomputed = open(data, config, later);
    assert_eq!(
        recomputed.assignment_priority(&reading_id).unwrap(),
        PriorityTier::Medium
    );

    // Search reports the same tier the store does.
    let hits = recomputed.search("history reading");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, format!("assignment-{reading_id}"));
    assert_eq!(hits[0].priority, Some(PriorityTier::Medium));
    let calculus = recomputed.search("calculus");
    assert_eq!(calculus[0].priority, Some(PriorityTier::High));
}

#[test]
fn test_search_min_query_len_from_config() {
    let mut config = Config::default();
    config.set("search.min_query_len", "4").unwrap();
    assert_eq!(config.search.min_query_len, 4);
    let mut ws = open(WorkspaceData::default(), config, monday());
    seed(&mut ws);

    assert!(ws.search("mat").is_empty());
    // Surrounding whitespace does not count towards the length.
    assert!(ws.search("  mat  ").is_empty());
    assert_eq!(ws.search("math").len(), 3);
    assert_eq!(ws.search("\tmath \n").len(), 3);

    let mut config = Config::default();
    config.set("search.min_query_len", "0").unwrap();
    let mut ws = open(WorkspaceData::default(), config, monday());
    seed(&mut ws);
    // An empty query matches everything once the minimum is zero.
    assert!(ws.search("").len() > 3);
    assert_eq!(ws.search("m").len(), ws.search("M").len());
}

#[test]
fn test_weekly_goal_tracks_config() {
    let mut config = Config::default();
    config.set("study.weekly_goal_hours", "4").unwrap();
    let mut ws = open(WorkspaceData::default(), config, monday());
    seed(&mut ws);
    assert_eq!(ws.weekly_goal_progress(), 50.0);
}
