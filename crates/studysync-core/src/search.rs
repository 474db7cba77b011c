//! Dashboard-wide search.
//!
//! A single query is matched case-insensitively as a substring against
//! every store. Hits keep the order of the sources below: tasks,
//! assignments, today's classes, subjects, goals, notes, budget.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::budget::Transaction;
use crate::notes::Note;
use crate::priority::{PriorityMode, PriorityTier};
use crate::study::Goal;
use crate::task::Task;
use crate::timetable::{format_clock_time, ClassSlot, Subject};

/// Queries shorter than this return nothing.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Task,
    Assignment,
    Schedule,
    Subject,
    Goal,
    Note,
    Budget,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub kind: ResultKind,
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityTier>,
}

/// Borrowed view over everything searchable.
#[derive(Debug, Clone, Copy)]
pub struct SearchSources<'a> {
    pub tasks: &'a [Task],
    pub assignments: &'a [Assignment],
    pub classes: &'a [ClassSlot],
    pub subjects: &'a [Subject],
    pub goals: &'a [Goal],
    pub notes: &'a [Note],
    pub transactions: &'a [Transaction],
}

fn matches(needle: &str, fields: &[&str]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Run a query against every source.
///
/// Only classes scheduled on `today`'s weekday are searched, matching what
/// the dashboard shows. Assignment hits carry the tier `mode` resolves for
/// `today`.
pub fn search(
    sources: &SearchSources<'_>,
    query: &str,
    today: NaiveDate,
    min_query_len: usize,
    mode: PriorityMode,
) -> Vec<SearchResult> {
    let query = query.trim();
    if query.chars().count() < min_query_len {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for task in sources.tasks {
        if matches(&needle, &[&task.title, &task.subject]) {
            results.push(SearchResult {
                kind: ResultKind::Task,
                id: format!("task-{}", task.id),
                title: task.title.clone(),
                content: format!("{} - Due {}", task.subject, task.due_date),
                metadata: Some(task.subject.clone()),
                priority: Some(task.priority),
            });
        }
    }

    for assignment in sources.assignments {
        if matches(&needle, &[&assignment.title, &assignment.subject]) {
            results.push(SearchResult {
                kind: ResultKind::Assignment,
                id: format!("assignment-{}", assignment.id),
                title: assignment.title.clone(),
                content: format!("{} - Due {}", assignment.subject, assignment.due_date),
                metadata: Some(assignment.grading_label()),
                priority: Some(assignment.effective_priority(today, mode)),
            });
        }
    }

    let weekday = today.weekday();
    for class in sources.classes.iter().filter(|c| c.day == weekday) {
        if matches(&needle, &[&class.subject, &class.room]) {
            let time = format_clock_time(class.start);
            results.push(SearchResult {
                kind: ResultKind::Schedule,
                id: format!("schedule-{}", class.id),
                title: class.subject.clone(),
                content: format!("{time} - {}", class.room),
                metadata: Some(time),
                priority: None,
            });
        }
    }

    for subject in sources.subjects {
        if matches(&needle, &[&subject.name, &subject.code, &subject.instructor]) {
            results.push(SearchResult {
                kind: ResultKind::Subject,
                id: format!("subject-{}", subject.id),
                title: subject.name.clone(),
                content: format!("{} - {}", subject.code, subject.instructor),
                metadata: Some(subject.code.clone()),
                priority: None,
            });
        }
    }

    for (index, goal) in sources.goals.iter().enumerate() {
        if matches(&needle, &[&goal.title]) {
            results.push(SearchResult {
                kind: ResultKind::Goal,
                id: format!("goal-{index}"),
                title: goal.title.clone(),
                content: format!("{} / {} {}", goal.current, goal.target, goal.unit),
                metadata: Some(format!("{}% complete", goal.percent_complete())),
                priority: None,
            });
        }
    }

    for note in sources.notes {
        if matches(&needle, &[&note.title]) {
            results.push(SearchResult {
                kind: ResultKind::Note,
                id: format!("note-{}", note.id),
                title: note.title.clone(),
                content: format!("{} - {}", note.subject, note.date),
                metadata: Some(note.subject.clone()),
                priority: None,
            });
        }
    }

    for transaction in sources.transactions {
        if matches(&needle, &[transaction.category.as_str(), transaction.category.label()]) {
            results.push(SearchResult {
                kind: ResultKind::Budget,
                id: format!("budget-{}", transaction.id),
                title: transaction.category.label().to_string(),
                content: format!("${:.2}", transaction.amount),
                metadata: Some(format!("{:?}", transaction.kind).to_lowercase()),
                priority: None,
            });
        }
    }

    results
}
