//! Subcommand implementations.
//!
//! Every command that touches stored data opens a [`Session`], mutates the
//! workspace, and saves it back before printing.

pub mod assignment;
pub mod budget;
pub mod config;
pub mod note;
pub mod outline;
pub mod priority;
pub mod search;
pub mod study;
pub mod subject;
pub mod summary;
pub mod task;
pub mod timetable;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Serialize;
use studysync_core::{
    parse_clock_time, parse_due_date, Clock, Config, FixedClock, InvalidDateError, Snapshot,
    SystemClock, Workspace,
};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn parse_date(text: &str) -> Result<NaiveDate, InvalidDateError> {
    parse_due_date(text)
}

pub fn parse_time(text: &str) -> Result<NaiveTime, InvalidDateError> {
    parse_clock_time(text)
}

pub fn parse_weekday(text: &str) -> Result<Weekday, String> {
    text.parse::<Weekday>()
        .map_err(|_| format!("invalid day '{text}': expected a weekday name such as mon or monday"))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A loaded workspace bound to its snapshot file.
pub struct Session {
    pub workspace: Workspace,
    snapshot: Snapshot,
}

impl Session {
    pub fn open(today: Option<NaiveDate>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let snapshot = Snapshot::open_default()?;
        let data = snapshot.load()?;
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock::on(date)),
            None => Box::new(SystemClock),
        };
        Ok(Self {
            workspace: Workspace::with_data(data, config, clock),
            snapshot,
        })
    }

    /// Persist the workspace, logging the events that led here.
    pub fn save(&mut self) -> CmdResult {
        for event in self.workspace.take_events() {
            tracing::debug!(?event, "workspace event");
        }
        self.snapshot.save(self.workspace.data())?;
        Ok(())
    }
}
