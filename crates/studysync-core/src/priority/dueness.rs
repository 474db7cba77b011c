//! Human-readable relative due-date descriptions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::days_until_due;
use crate::error::InvalidDateError;

/// Day offset at or below which a due date is highlighted as urgent.
pub const URGENT_WITHIN_DAYS: i64 = 2;

/// Wording for future due dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuenessStyle {
    /// "4 days remaining" (detail views)
    #[default]
    Remaining,
    /// "4 days left" (compact cards)
    Left,
}

/// Relative description of a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dueness {
    pub days: i64,
    pub style: DuenessStyle,
}

impl Dueness {
    pub fn is_due_today(&self) -> bool {
        self.days == 0
    }

    pub fn is_overdue(&self) -> bool {
        self.days < 0
    }

    pub fn is_urgent(&self) -> bool {
        self.days <= URGENT_WITHIN_DAYS
    }
}

impl fmt::Display for Dueness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days {
            0 => f.write_str("Due today!"),
            d if d < 0 => write!(f, "{} days overdue", d.unsigned_abs()),
            d => match self.style {
                DuenessStyle::Remaining => write!(f, "{d} days remaining"),
                DuenessStyle::Left => write!(f, "{d} days left"),
            },
        }
    }
}

/// Describe a day offset with the default "remaining" wording.
pub fn describe_dueness(days_until_due: i64) -> Dueness {
    describe_dueness_with(days_until_due, DuenessStyle::Remaining)
}

pub fn describe_dueness_with(days_until_due: i64, style: DuenessStyle) -> Dueness {
    Dueness {
        days: days_until_due,
        style,
    }
}

/// Convenience: offset and description in one step.
pub fn dueness_for(due_date: NaiveDate, today: NaiveDate, style: DuenessStyle) -> Dueness {
    describe_dueness_with(days_until_due(due_date, today), style)
}

/// Parse an ISO `YYYY-MM-DD` date.
///
/// The engine only takes typed dates; this is the validation step for text
/// coming from users or snapshot files.
pub fn parse_due_date(text: &str) -> Result<NaiveDate, InvalidDateError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| InvalidDateError::new(text, "YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_today() {
        assert_eq!(describe_dueness(0).to_string(), "Due today!");
        assert!(describe_dueness(0).is_due_today());
    }

    #[test]
    fn overdue_mentions_absolute_days() {
        let text = describe_dueness(-3).to_string();
        assert!(text.contains('3'));
        assert!(text.contains("overdue"));
        assert!(!text.contains('-'));
    }

    #[test]
    fn future_wording_follows_style() {
        assert_eq!(describe_dueness(4).to_string(), "4 days remaining");
        assert_eq!(
            describe_dueness_with(4, DuenessStyle::Left).to_string(),
            "4 days left"
        );
    }

    #[test]
    fn urgency_threshold() {
        assert!(describe_dueness(2).is_urgent());
        assert!(describe_dueness(-1).is_urgent());
        assert!(!describe_dueness(3).is_urgent());
    }

    #[test]
    fn parse_due_date_accepts_iso_and_rejects_text() {
        assert_eq!(
            parse_due_date("2024-01-20").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
        );
        let err = parse_due_date("next friday").unwrap_err();
        assert_eq!(err.input, "next friday");
        assert!(parse_due_date("2024-02-30").is_err());
    }

    #[test]
    fn dueness_for_combines_offset_and_wording() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 1, 18).unwrap();
        assert_eq!(
            dueness_for(due, today, DuenessStyle::Left).to_string(),
            "3 days left"
        );
    }
}
