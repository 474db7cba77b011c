//! Assignment priority scoring.
//!
//! Graded work is scored in three independent bands and the sum is
//! classified into a [`PriorityTier`]:
//! - Deadline proximity (10-40 points, closer = more points)
//! - Point value (10-30 points)
//! - Effort estimate (10-30 points, longer work = more points)
//!
//! Ungraded work is always `Low` and never reaches the bands.
//!
//! All functions are pure: "today" is an argument, never read from a global.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Score at or above which a graded assignment is `High`.
pub const HIGH_THRESHOLD: u32 = 70;
/// Score at or above which a graded assignment is `Medium`.
pub const MEDIUM_THRESHOLD: u32 = 50;

/// Priority tier. Ordered `Low < Medium < High`.
///
/// The `Medium` default only fills a missing `priority` on a stored task;
/// assignments always carry a computed tier.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl PriorityTier {
    /// Classify an aggregate band score.
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_THRESHOLD {
            PriorityTier::High
        } else if score >= MEDIUM_THRESHOLD {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(PriorityTier::High),
            "medium" => Ok(PriorityTier::Medium),
            "low" => Ok(PriorityTier::Low),
            other => Err(ValidationError::invalid(
                "priority",
                format!("expected high, medium or low, got '{other}'"),
            )),
        }
    }
}

/// The four raw fields the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityInput {
    pub due_date: NaiveDate,
    pub max_marks: u32,
    pub hours_to_complete: f64,
    pub is_graded: bool,
}

/// Reject effort estimates the bands cannot score: NaN, infinite, zero or
/// negative hours.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for `hours_to_complete`.
pub fn validate_hours(hours: f64) -> Result<f64, ValidationError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(ValidationError::invalid(
            "hours_to_complete",
            format!("must be a positive number, got {hours}"),
        ));
    }
    Ok(hours)
}

/// Points contributed by each band, plus their sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub days_until_due: i64,
    pub deadline_points: u32,
    pub value_points: u32,
    pub effort_points: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn tier(&self) -> PriorityTier {
        PriorityTier::from_score(self.total)
    }
}

/// Whole days from `today` to `due_date`.
///
/// Positive means the due date is ahead, zero means due today and negative
/// means overdue by that many days. Both inputs are calendar dates so the
/// day offset is already integral.
pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    due_date.signed_duration_since(today).num_days()
}

/// Deadline band (10-40). Overdue work lands in the most urgent band.
///
/// - <= 2 days: 40
/// - <= 5 days: 30
/// - <= 10 days: 20
/// - otherwise: 10
pub fn deadline_points(days_until_due: i64) -> u32 {
    if days_until_due <= 2 {
        40
    } else if days_until_due <= 5 {
        30
    } else if days_until_due <= 10 {
        20
    } else {
        10
    }
}

/// Value band (10-30).
pub fn value_points(max_marks: u32) -> u32 {
    if max_marks >= 100 {
        30
    } else if max_marks >= 50 {
        20
    } else {
        10
    }
}

/// Effort band (10-30).
///
/// Non-finite estimates are a caller contract violation; NaN compares false
/// everywhere and falls through to the lowest band.
pub fn effort_points(hours_to_complete: f64) -> u32 {
    if hours_to_complete >= 15.0 {
        30
    } else if hours_to_complete >= 8.0 {
        20
    } else {
        10
    }
}

/// Band-by-band score for graded work. `None` when ungraded.
pub fn score_breakdown(input: &PriorityInput, today: NaiveDate) -> Option<ScoreBreakdown> {
    if !input.is_graded {
        return None;
    }

    let days = days_until_due(input.due_date, today);
    let deadline = deadline_points(days);
    let value = value_points(input.max_marks);
    let effort = effort_points(input.hours_to_complete);

    Some(ScoreBreakdown {
        days_until_due: days,
        deadline_points: deadline,
        value_points: value,
        effort_points: effort,
        total: deadline + value + effort,
    })
}

/// Classify an assignment into a priority tier.
pub fn compute_priority(
    due_date: NaiveDate,
    max_marks: u32,
    hours_to_complete: f64,
    is_graded: bool,
    today: NaiveDate,
) -> PriorityTier {
    let input = PriorityInput {
        due_date,
        max_marks,
        hours_to_complete,
        is_graded,
    };
    score_breakdown(&input, today)
        .map(|breakdown| breakdown.tier())
        .unwrap_or(PriorityTier::Low)
}

impl PriorityInput {
    pub fn tier(&self, today: NaiveDate) -> PriorityTier {
        compute_priority(
            self.due_date,
            self.max_marks,
            self.hours_to_complete,
            self.is_graded,
            today,
        )
    }
}
