use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentStatus;
use crate::budget::TransactionKind;
use crate::priority::PriorityTier;

/// Every workspace mutation produces an Event.
/// Front ends drain the queue after each operation and re-render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    AssignmentAdded {
        id: String,
        priority: PriorityTier,
        at: NaiveDateTime,
    },
    AssignmentRemoved {
        id: String,
        at: NaiveDateTime,
    },
    ProgressUpdated {
        id: String,
        progress: u32,
        status: AssignmentStatus,
        at: NaiveDateTime,
    },
    /// Stored tiers were re-derived; `changed` of them moved.
    PrioritiesRefreshed {
        changed: usize,
        at: NaiveDateTime,
    },
    TaskAdded {
        id: String,
        at: NaiveDateTime,
    },
    TaskToggled {
        id: String,
        completed: bool,
        at: NaiveDateTime,
    },
    TaskDeleted {
        id: String,
        at: NaiveDateTime,
    },
    TransactionAdded {
        id: String,
        kind: TransactionKind,
        amount: f64,
        at: NaiveDateTime,
    },
    TransactionDeleted {
        id: String,
        at: NaiveDateTime,
    },
    SessionLogged {
        id: String,
        minutes: u32,
        at: NaiveDateTime,
    },
    ClassScheduled {
        id: String,
        at: NaiveDateTime,
    },
    NoteAdded {
        id: String,
        at: NaiveDateTime,
    },
    NoteStarred {
        id: String,
        starred: bool,
        at: NaiveDateTime,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let event = Event::TaskToggled {
            id: "t1".to_string(),
            completed: true,
            at,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TaskToggled");
        assert_eq!(json["completed"], true);
    }
}
