//! Weekly class timetable and the subject catalog.

use chrono::{Datelike, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{InvalidDateError, Result, StoreError, ValidationError};

/// Parse a clock time: "8:30 AM", "02:00 PM" or 24-hour "14:00".
///
/// 12 AM is midnight and 12 PM is noon.
pub fn parse_clock_time(text: &str) -> Result<NaiveTime, InvalidDateError> {
    let invalid = || InvalidDateError::new(text, "h:mm AM|PM or HH:MM");
    let trimmed = text.trim();

    let (clock, period) = match trimmed.rsplit_once(' ') {
        Some((clock, period)) => (clock.trim(), Some(period.to_ascii_uppercase())),
        None => (trimmed, None),
    };
    let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;

    let hour24 = match period.as_deref() {
        None => hours,
        Some(_) if hours == 0 || hours > 12 => return Err(invalid()),
        Some("AM") => hours % 12,
        Some("PM") => hours % 12 + 12,
        Some(_) => return Err(invalid()),
    };
    NaiveTime::from_hms_opt(hour24, minutes, 0).ok_or_else(invalid)
}

/// Minutes since midnight.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    use chrono::Timelike;
    time.hour() * 60 + time.minute()
}

/// "8:00 AM" style rendering.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSlot {
    pub id: String,
    pub day: Weekday,
    pub start: NaiveTime,
    pub subject: String,
    pub room: String,
    #[serde(default)]
    pub color: String,
    pub duration_minutes: u32,
}

impl ClassSlot {
    pub fn end(&self) -> NaiveTime {
        self.start + chrono::Duration::minutes(i64::from(self.duration_minutes))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassSlot {
    pub day: Weekday,
    pub start: NaiveTime,
    pub subject: String,
    pub room: String,
    #[serde(default)]
    pub color: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    slots: Vec<ClassSlot>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns a validation error for a blank subject or zero duration.
    pub fn add(&mut self, draft: NewClassSlot) -> Result<&ClassSlot> {
        Self::validate(&draft)?;
        let slot = ClassSlot {
            id: Uuid::new_v4().to_string(),
            day: draft.day,
            start: draft.start,
            subject: draft.subject,
            room: draft.room,
            color: draft.color,
            duration_minutes: draft.duration_minutes,
        };
        self.slots.push(slot);
        Ok(&self.slots[self.slots.len() - 1])
    }

    /// Replace every field of an existing slot, keeping its id.
    pub fn update(&mut self, id: &str, draft: NewClassSlot) -> Result<&ClassSlot> {
        Self::validate(&draft)?;
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Class", id))?;
        slot.day = draft.day;
        slot.start = draft.start;
        slot.subject = draft.subject;
        slot.room = draft.room;
        slot.color = draft.color;
        slot.duration_minutes = draft.duration_minutes;
        Ok(slot)
    }

    pub fn remove(&mut self, id: &str) -> Result<ClassSlot> {
        let index = self
            .slots
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Class", id))?;
        Ok(self.slots.remove(index))
    }

    pub fn list(&self) -> &[ClassSlot] {
        &self.slots
    }

    /// Classes on the given weekday, earliest first.
    pub fn for_day(&self, day: Weekday) -> Vec<&ClassSlot> {
        let mut classes: Vec<&ClassSlot> = self.slots.iter().filter(|s| s.day == day).collect();
        classes.sort_by_key(|s| s.start);
        classes
    }

    /// Today's classes according to `clock`.
    pub fn today(&self, clock: &dyn Clock) -> Vec<&ClassSlot> {
        self.for_day(clock.today().weekday())
    }

    fn validate(draft: &NewClassSlot) -> Result<(), ValidationError> {
        if draft.subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }
        if draft.duration_minutes == 0 {
            return Err(ValidationError::invalid("duration_minutes", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// Core major requirements
    Hardcore,
    /// Supporting courses
    Softcore,
    Elective,
    /// Self-study or hobbies
    Personal,
}

impl FromStr for SubjectKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hardcore" => Ok(SubjectKind::Hardcore),
            "softcore" => Ok(SubjectKind::Softcore),
            "elective" => Ok(SubjectKind::Elective),
            "personal" => Ok(SubjectKind::Personal),
            other => Err(ValidationError::invalid(
                "kind",
                format!("expected hardcore, softcore, elective or personal, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub code: String,
    pub kind: SubjectKind,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub instructor: String,
    pub credits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
    pub kind: SubjectKind,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub instructor: String,
    pub credits: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns a validation error if the name or code is blank.
    pub fn add(&mut self, draft: NewSubject) -> Result<&Subject> {
        Self::validate(&draft)?;
        let subject = Subject {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            code: draft.code,
            kind: draft.kind,
            color: draft.color,
            classroom: draft.classroom,
            instructor: draft.instructor,
            credits: draft.credits,
        };
        self.subjects.push(subject);
        Ok(&self.subjects[self.subjects.len() - 1])
    }

    pub fn update(&mut self, id: &str, draft: NewSubject) -> Result<&Subject> {
        Self::validate(&draft)?;
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Subject", id))?;
        subject.name = draft.name;
        subject.code = draft.code;
        subject.kind = draft.kind;
        subject.color = draft.color;
        subject.classroom = draft.classroom;
        subject.instructor = draft.instructor;
        subject.credits = draft.credits;
        Ok(subject)
    }

    pub fn remove(&mut self, id: &str) -> Result<Subject> {
        let index = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Subject", id))?;
        Ok(self.subjects.remove(index))
    }

    pub fn list(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn total_credits(&self) -> u32 {
        self.subjects.iter().map(|s| s.credits).sum()
    }

    pub fn by_kind(&self, kind: SubjectKind) -> Vec<&Subject> {
        self.subjects.iter().filter(|s| s.kind == kind).collect()
    }

    fn validate(draft: &NewSubject) -> Result<(), ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if draft.code.trim().is_empty() {
            return Err(ValidationError::MissingField("code"));
        }
        Ok(())
    }
}
