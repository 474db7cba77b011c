//! One-off scoring without touching stored data.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use studysync_core::priority::{self, dueness_for, validate_hours, PriorityInput};
use studysync_core::{Config, DuenessStyle};

use super::CmdResult;

#[derive(Subcommand)]
pub enum PriorityAction {
    /// Classify an assignment into high, medium or low
    Score {
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = super::parse_date)]
        due: NaiveDate,
        /// Maximum marks
        #[arg(long, default_value = "100")]
        marks: u32,
        /// Estimated hours to complete
        #[arg(long, default_value = "1")]
        hours: f64,
        /// The work is not graded
        #[arg(long)]
        ungraded: bool,
        /// Print the band-by-band breakdown as JSON
        #[arg(long)]
        explain: bool,
    },
    /// Describe a due date relative to today
    Due {
        /// Due date (YYYY-MM-DD)
        #[arg(value_parser = super::parse_date)]
        date: NaiveDate,
        /// Wording: remaining or left (defaults to priority.dueness_style)
        #[arg(long)]
        style: Option<String>,
    },
}

pub fn run(action: PriorityAction, today: Option<NaiveDate>) -> CmdResult {
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    match action {
        PriorityAction::Score {
            due,
            marks,
            hours,
            ungraded,
            explain,
        } => {
            let input = PriorityInput {
                due_date: due,
                max_marks: marks,
                hours_to_complete: validate_hours(hours)?,
                is_graded: !ungraded,
            };
            if explain {
                match priority::score_breakdown(&input, today) {
                    Some(breakdown) => super::print_json(&serde_json::json!({
                        "tier": breakdown.tier(),
                        "breakdown": breakdown,
                    }))?,
                    None => super::print_json(&serde_json::json!({
                        "tier": input.tier(today),
                        "breakdown": null,
                    }))?,
                }
            } else {
                println!("{}", input.tier(today));
            }
        }
        PriorityAction::Due { date, style } => {
            let style = match style.as_deref() {
                Some("left") => DuenessStyle::Left,
                Some("remaining") => DuenessStyle::Remaining,
                Some(other) => return Err(format!("unknown style: {other}").into()),
                None => Config::load_or_default().priority.dueness_style,
            };
            let dueness = dueness_for(date, today, style);
            if dueness.is_urgent() && !dueness.is_overdue() {
                println!("{dueness} (urgent)");
            } else {
                println!("{dueness}");
            }
        }
    }
    Ok(())
}
