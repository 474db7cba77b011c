//! Priority engine: tier classification and date-relative display facts.
//!
//! This module provides:
//! - Band scoring and tier classification for assignments
//! - Day offsets between a due date and today
//! - Relative due-date wording ("3 days overdue", "Due today!")
//! - The stored-vs-recomputed tier policy used by stores

mod dueness;
mod engine;

pub use dueness::{
    describe_dueness, describe_dueness_with, dueness_for, parse_due_date, Dueness, DuenessStyle,
    URGENT_WITHIN_DAYS,
};
pub use engine::{
    compute_priority, days_until_due, deadline_points, effort_points, score_breakdown,
    validate_hours, value_points, PriorityInput, PriorityTier, ScoreBreakdown, HIGH_THRESHOLD,
    MEDIUM_THRESHOLD,
};

use serde::{Deserialize, Serialize};

/// How a record's tier is reported after creation.
///
/// `Stored` keeps the tier computed at creation time until an explicit
/// refresh; `Recompute` derives it from the raw fields on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriorityMode {
    #[default]
    Stored,
    Recompute,
}
