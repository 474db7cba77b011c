//! Dashboard summary command.

use chrono::NaiveDate;
use studysync_core::study::format_duration;
use studysync_core::timetable::format_clock_time;

use super::{CmdResult, Session};

pub fn run(today: Option<NaiveDate>) -> CmdResult {
    let session = Session::open(today)?;
    let ws = &session.workspace;
    let summary = ws.summary();
    let currency = &ws.config().currency;

    println!("StudySync - {}", summary.today.format("%A, %B %-d, %Y"));
    println!(
        "Tasks:    {} active, {} completed",
        summary.active_tasks, summary.completed_tasks
    );
    println!("Balance:  {currency}{:.2}", summary.balance);
    println!(
        "Study:    {} today, {} this week ({:.0}% of {})",
        format_duration(summary.today_study_minutes),
        format_duration(summary.weekly_study_minutes),
        summary.weekly_goal_progress,
        format_duration(summary.weekly_goal_minutes)
    );

    if !summary.upcoming_assignments.is_empty() {
        println!("Upcoming:");
        for item in &summary.upcoming_assignments {
            println!("  [{}] {} ({}) - {}", item.priority, item.title, item.subject, item.dueness);
        }
    }
    if !summary.todays_classes.is_empty() {
        println!("Classes today:");
        for class in &summary.todays_classes {
            println!(
                "  {} {} - {}",
                format_clock_time(class.start),
                class.subject,
                class.room
            );
        }
    }
    Ok(())
}
