//! Assignment planner commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studysync_core::NewAssignment;

use super::{CmdResult, Session};

#[derive(Subcommand)]
pub enum AssignmentAction {
    /// Add an assignment; its priority is scored on creation
    Add {
        /// Assignment title
        title: String,
        /// Subject name
        #[arg(long)]
        subject: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = super::parse_date)]
        due: NaiveDate,
        /// Estimated hours to complete
        #[arg(long, default_value = "1")]
        hours: f64,
        /// Maximum marks
        #[arg(long, default_value = "100")]
        marks: u32,
        /// The assignment is not graded
        #[arg(long)]
        ungraded: bool,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// List assignments, highest priority first
    List {
        /// Sort by due date instead
        #[arg(long)]
        by_due: bool,
    },
    /// Show one assignment
    Get {
        /// Assignment ID
        id: String,
    },
    /// Set progress (0-100)
    Progress {
        /// Assignment ID
        id: String,
        /// Percentage complete
        percent: u32,
    },
    /// Replace the assignment's notes
    Notes {
        /// Assignment ID
        id: String,
        /// Note text
        text: String,
    },
    /// Record an attached file
    Attach {
        /// Assignment ID
        id: String,
        /// File name
        name: String,
        /// Size in bytes
        #[arg(long, default_value = "0")]
        size: u64,
    },
    /// Remove an attached file by name
    Detach {
        /// Assignment ID
        id: String,
        /// File name
        name: String,
    },
    /// Delete an assignment
    Delete {
        /// Assignment ID
        id: String,
    },
    /// Re-score stored priorities against today
    Refresh,
    /// Incomplete assignments due soon
    Upcoming {
        /// Window in days (defaults to priority.upcoming_days)
        #[arg(long)]
        days: Option<i64>,
    },
}

pub fn run(action: AssignmentAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;

    match action {
        AssignmentAction::Add {
            title,
            subject,
            due,
            hours,
            marks,
            ungraded,
            description,
        } => {
            let mut draft = NewAssignment::new(title, subject, due)
                .with_hours(hours)
                .with_marks(marks);
            if ungraded {
                draft = draft.ungraded();
            }
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let assignment = ws.add_assignment(draft)?;
            println!("Assignment created: {}", assignment.id);
            println!("{}", serde_json::to_string_pretty(assignment)?);
        }
        AssignmentAction::List { by_due } => {
            let mut assignments = ws.assignments_by_priority();
            if by_due {
                assignments.sort_by_key(|a| a.due_date);
            }
            return super::print_json(&assignments);
        }
        AssignmentAction::Get { id } => {
            let assignment = ws
                .assignments()
                .get(&id)
                .ok_or_else(|| format!("assignment not found: {id}"))?;
            let priority = ws.assignment_priority(&id)?;
            let style = ws.config().priority.dueness_style;
            super::print_json(&serde_json::json!({
                "assignment": assignment,
                "effective_priority": priority,
                "dueness": assignment.dueness(ws.today(), style).to_string(),
            }))?;
            return Ok(());
        }
        AssignmentAction::Progress { id, percent } => {
            let status = ws.update_progress(&id, percent)?;
            println!("{}", serde_json::to_string(&status)?.trim_matches('"'));
        }
        AssignmentAction::Notes { id, text } => {
            ws.update_assignment_notes(&id, text)?;
            println!("ok");
        }
        AssignmentAction::Attach { id, name, size } => {
            let file = ws.attach_file(&id, name, size)?;
            println!("Attached {} ({})", file.name, file.display_size());
        }
        AssignmentAction::Detach { id, name } => {
            ws.detach_file(&id, &name)?;
            println!("Detached {name}");
        }
        AssignmentAction::Delete { id } => {
            let removed = ws.remove_assignment(&id)?;
            println!("Assignment deleted: {}", removed.id);
        }
        AssignmentAction::Refresh => {
            let changed = ws.refresh_priorities();
            println!("{changed} priorities changed");
        }
        AssignmentAction::Upcoming { days } => {
            let days = days.unwrap_or(ws.config().priority.upcoming_days);
            let style = ws.config().priority.dueness_style;
            let today = ws.today();
            for assignment in ws.assignments().upcoming(today, days) {
                println!(
                    "{}  [{}]  {} - {}",
                    assignment.id,
                    assignment.effective_priority(today, ws.config().priority.mode),
                    assignment.title,
                    assignment.dueness(today, style)
                );
            }
            return Ok(());
        }
    }

    session.save()
}
