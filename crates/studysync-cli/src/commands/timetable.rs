//! Class timetable commands for CLI.

use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Args, Subcommand};
use studysync_core::timetable::{format_clock_time, ClassSlot};
use studysync_core::NewClassSlot;

use super::{CmdResult, Session};

#[derive(Args)]
pub struct SlotArgs {
    /// Weekday (mon, tuesday, ...)
    #[arg(long, value_parser = super::parse_weekday)]
    day: Weekday,
    /// Start time ("8:00 AM" or "14:00")
    #[arg(long, value_parser = super::parse_time)]
    start: NaiveTime,
    /// Subject name
    #[arg(long)]
    subject: String,
    /// Room
    #[arg(long, default_value = "")]
    room: String,
    /// Length in minutes
    #[arg(long, default_value = "60")]
    duration: u32,
    /// Display color
    #[arg(long, default_value = "")]
    color: String,
}

impl From<SlotArgs> for NewClassSlot {
    fn from(args: SlotArgs) -> Self {
        NewClassSlot {
            day: args.day,
            start: args.start,
            subject: args.subject,
            room: args.room,
            color: args.color,
            duration_minutes: args.duration,
        }
    }
}

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Schedule a weekly class
    Add(SlotArgs),
    /// Replace a class slot
    Update {
        /// Class ID
        id: String,
        #[command(flatten)]
        slot: SlotArgs,
    },
    /// Remove a class slot
    Remove {
        /// Class ID
        id: String,
    },
    /// Show classes, optionally for one weekday
    List {
        #[arg(long, value_parser = super::parse_weekday)]
        day: Option<Weekday>,
    },
    /// Today's classes
    Today,
}

fn print_slots(slots: &[&ClassSlot]) {
    for slot in slots {
        println!(
            "{:<4} {} - {}  {:<20} {}  {}",
            slot.day,
            format_clock_time(slot.start),
            format_clock_time(slot.end()),
            slot.subject,
            slot.room,
            slot.id
        );
    }
}

pub fn run(action: TimetableAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;

    match action {
        TimetableAction::Add(args) => {
            let slot = ws.add_class(args.into())?;
            println!("Class scheduled: {}", slot.id);
        }
        TimetableAction::Update { id, slot } => {
            let slot = ws.update_class(&id, slot.into())?;
            println!("Class updated: {}", slot.id);
        }
        TimetableAction::Remove { id } => {
            let slot = ws.remove_class(&id)?;
            println!("Class removed: {}", slot.id);
        }
        TimetableAction::List { day } => {
            match day {
                Some(day) => print_slots(&ws.timetable().for_day(day)),
                None => {
                    let mut all: Vec<&ClassSlot> = ws.timetable().list().iter().collect();
                    all.sort_by_key(|s| (s.day.num_days_from_monday(), s.start));
                    print_slots(&all);
                }
            }
            return Ok(());
        }
        TimetableAction::Today => {
            print_slots(&ws.todays_classes());
            return Ok(());
        }
    }

    session.save()
}
