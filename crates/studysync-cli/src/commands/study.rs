//! Study hours commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studysync_core::study::format_duration;
use studysync_core::{Goal, NewStudySession, SessionKind};

use super::{CmdResult, Session};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Log a finished study session
    Log {
        /// Subject studied
        subject: String,
        /// Duration in minutes
        minutes: u32,
        /// focused, review, practice or reading
        #[arg(long, default_value = "focused")]
        kind: SessionKind,
        /// Session date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = super::parse_date)]
        date: Option<NaiveDate>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List logged sessions
    List,
    /// Delete a session
    Delete {
        /// Session ID
        id: String,
    },
    /// Totals, weekly goal progress and per-subject breakdown
    Stats,
    /// Start the study timer
    Start {
        /// Subject to study
        subject: String,
        #[arg(long, default_value = "focused")]
        kind: SessionKind,
    },
    /// Stop the timer and log the session
    Stop,
    /// Create or update a goal
    Goal {
        /// Goal title, e.g. "Study Hours"
        title: String,
        /// Progress so far
        #[arg(long)]
        current: f64,
        /// Target value
        #[arg(long)]
        target: f64,
        /// Unit label
        #[arg(long, default_value = "")]
        unit: String,
    },
    /// List goals
    Goals,
}

pub fn run(action: StudyAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;

    match action {
        StudyAction::Log {
            subject,
            minutes,
            kind,
            date,
            notes,
        } => {
            let date = date.unwrap_or_else(|| ws.today());
            let logged = ws.log_session(NewStudySession {
                subject,
                duration_minutes: minutes,
                date,
                notes: notes.unwrap_or_default(),
                kind,
            })?;
            println!(
                "Logged {} of {}: {}",
                format_duration(logged.duration_minutes),
                logged.subject,
                logged.id
            );
        }
        StudyAction::List => return super::print_json(ws.study().list()),
        StudyAction::Delete { id } => {
            let removed = ws.delete_session(&id)?;
            println!("Session deleted: {}", removed.id);
        }
        StudyAction::Stats => {
            let today = ws.today();
            let log = ws.study();
            println!("Total:     {}", format_duration(log.total_minutes()));
            println!("Today:     {}", format_duration(log.today_minutes(today)));
            println!("This week: {}", format_duration(log.weekly_minutes(today)));
            println!(
                "Goal:      {:.0}% of {}h",
                ws.weekly_goal_progress(),
                ws.config().study.weekly_goal_hours
            );
            for entry in log.subject_breakdown() {
                println!("  {:<20} {:.1}h", entry.subject, entry.hours);
            }
            return Ok(());
        }
        StudyAction::Start { subject, kind } => {
            let timer = ws.start_timer(subject, kind)?;
            println!(
                "Timer started for {} at {}",
                timer.subject,
                timer.started_at.format("%H:%M")
            );
        }
        StudyAction::Stop => {
            let logged = ws.stop_timer()?;
            println!(
                "Logged {} of {}",
                format_duration(logged.duration_minutes),
                logged.subject
            );
        }
        StudyAction::Goal {
            title,
            current,
            target,
            unit,
        } => {
            let goal = ws.set_goal(Goal::new(title, current, target, unit))?;
            println!("{}: {}% complete", goal.title, goal.percent_complete());
        }
        StudyAction::Goals => return super::print_json(ws.goals()),
    }

    session.save()
}
