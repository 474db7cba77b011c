//! Study-hours log, subject breakdown and weekly goal tracking.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, StoreError, ValidationError};

/// Window used by weekly totals, in days before today.
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Longest single session accepted, one day.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

fn sum_minutes<'a>(sessions: impl Iterator<Item = &'a StudySession>) -> u32 {
    sessions.fold(0, |total, s| total.saturating_add(s.duration_minutes))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    #[default]
    Focused,
    Review,
    Practice,
    Reading,
}

impl FromStr for SessionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "focused" => Ok(SessionKind::Focused),
            "review" => Ok(SessionKind::Review),
            "practice" => Ok(SessionKind::Practice),
            "reading" => Ok(SessionKind::Reading),
            other => Err(ValidationError::invalid(
                "kind",
                format!("expected focused, review, practice or reading, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub subject: String,
    pub duration_minutes: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub kind: SessionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudySession {
    pub subject: String,
    pub duration_minutes: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub kind: SessionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectMinutes {
    pub subject: String,
    pub minutes: u32,
    pub hours: f64,
}

/// "2h 5m" when at least an hour, otherwise "45m".
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyLog {
    sessions: Vec<StudySession>,
}

impl StudyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns a validation error for a blank subject, a zero duration or a
    /// duration longer than [`MAX_SESSION_MINUTES`].
    pub fn add(&mut self, draft: NewStudySession) -> Result<&StudySession> {
        if draft.subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject").into());
        }
        if draft.duration_minutes == 0 {
            return Err(ValidationError::invalid("duration_minutes", "must be at least 1").into());
        }
        if draft.duration_minutes > MAX_SESSION_MINUTES {
            return Err(ValidationError::invalid(
                "duration_minutes",
                format!("must be at most {MAX_SESSION_MINUTES}, got {}", draft.duration_minutes),
            )
            .into());
        }

        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            subject: draft.subject,
            duration_minutes: draft.duration_minutes,
            date: draft.date,
            notes: draft.notes,
            kind: draft.kind,
        };
        tracing::debug!(
            id = %session.id,
            minutes = session.duration_minutes,
            "study session logged"
        );
        self.sessions.push(session);
        Ok(&self.sessions[self.sessions.len() - 1])
    }

    pub fn delete(&mut self, id: &str) -> Result<StudySession> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Study session", id))?;
        Ok(self.sessions.remove(index))
    }

    pub fn list(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn total_minutes(&self) -> u32 {
        sum_minutes(self.sessions.iter())
    }

    /// Minutes logged on or after `today - 7 days`.
    pub fn weekly_minutes(&self, today: NaiveDate) -> u32 {
        let since = today - Duration::days(WEEK_WINDOW_DAYS);
        sum_minutes(self.sessions.iter().filter(|s| s.date >= since))
    }

    pub fn today_minutes(&self, today: NaiveDate) -> u32 {
        sum_minutes(self.sessions.iter().filter(|s| s.date == today))
    }

    /// Per-subject totals in order of first appearance.
    pub fn subject_breakdown(&self) -> Vec<SubjectMinutes> {
        let mut breakdown: Vec<SubjectMinutes> = Vec::new();
        for session in &self.sessions {
            match breakdown.iter_mut().find(|b| b.subject == session.subject) {
                Some(entry) => {
                    entry.minutes = entry.minutes.saturating_add(session.duration_minutes);
                }
                None => breakdown.push(SubjectMinutes {
                    subject: session.subject.clone(),
                    minutes: session.duration_minutes,
                    hours: 0.0,
                }),
            }
        }
        for entry in &mut breakdown {
            entry.hours = f64::from(entry.minutes) / 60.0;
        }
        breakdown
    }

    /// Weekly minutes as a percentage of the goal. Not capped at 100.
    pub fn weekly_goal_progress(&self, today: NaiveDate, goal_minutes: u32) -> f64 {
        if goal_minutes == 0 {
            return 0.0;
        }
        f64::from(self.weekly_minutes(today)) / f64::from(goal_minutes) * 100.0
    }
}

/// A numeric target such as "Study Hours: 18 / 30 hours".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub title: String,
    pub current: f64,
    pub target: f64,
    pub unit: String,
}

impl Goal {
    pub fn new(
        title: impl Into<String>,
        current: f64,
        target: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            current,
            target,
            unit: unit.into(),
        }
    }

    /// Rounded percentage of the target reached.
    pub fn percent_complete(&self) -> u32 {
        if self.target <= 0.0 {
            return 0;
        }
        (self.current / self.target * 100.0).round().max(0.0) as u32
    }
}

/// Stopwatch for a live study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    pub subject: String,
    pub kind: SessionKind,
    pub started_at: NaiveDateTime,
}

impl SessionTimer {
    pub fn start(subject: impl Into<String>, kind: SessionKind, at: NaiveDateTime) -> Self {
        Self {
            subject: subject.into(),
            kind,
            started_at: at,
        }
    }

    /// Whole minutes elapsed since start; never negative.
    pub fn elapsed_minutes(&self, at: NaiveDateTime) -> u32 {
        let minutes = at.signed_duration_since(self.started_at).num_minutes();
        u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)
    }

    /// Stop the timer and turn it into a session draft dated on the start day.
    /// A timer left running longer than a day logs [`MAX_SESSION_MINUTES`].
    ///
    /// # Errors
    /// Returns a validation error if less than a minute has elapsed.
    pub fn stop(self, at: NaiveDateTime) -> Result<NewStudySession, ValidationError> {
        let minutes = self.elapsed_minutes(at);
        if minutes == 0 {
            return Err(ValidationError::invalid(
                "duration_minutes",
                "timer ran for less than a minute",
            ));
        }
        Ok(NewStudySession {
            subject: self.subject,
            duration_minutes: minutes.min(MAX_SESSION_MINUTES),
            date: self.started_at.date(),
            notes: String::new(),
            kind: self.kind,
        })
    }
}
