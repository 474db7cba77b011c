//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studysync_core::{NewTask, PriorityTier};

use super::{CmdResult, Session};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Subject name
        #[arg(long)]
        subject: String,
        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = super::parse_date)]
        due: Option<NaiveDate>,
        /// Priority: high, medium or low
        #[arg(long, default_value = "medium")]
        priority: PriorityTier,
        /// Task description
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks still open
        #[arg(long, conflicts_with = "completed")]
        active: bool,
        /// Only finished tasks
        #[arg(long)]
        completed: bool,
    },
    /// Flip a task between open and done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;

    match action {
        TaskAction::Add {
            title,
            subject,
            due,
            priority,
            description,
        } => {
            let due = due.unwrap_or_else(|| ws.today());
            let mut draft = NewTask::new(title, subject, due).with_priority(priority);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let task = ws.add_task(draft)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::List { active, completed } => {
            let tasks = ws.tasks();
            return if active {
                super::print_json(&tasks.active())
            } else if completed {
                super::print_json(&tasks.completed())
            } else {
                super::print_json(tasks.list())
            };
        }
        TaskAction::Toggle { id } => {
            let completed = ws.toggle_task(&id)?;
            println!("{}", if completed { "completed" } else { "reopened" });
        }
        TaskAction::Delete { id } => {
            let task = ws.delete_task(&id)?;
            println!("Task deleted: {}", task.id);
        }
    }

    session.save()
}
