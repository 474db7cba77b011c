//! Assignments and the assignment store.
//!
//! An assignment's tier is computed when it is added. Whether later reads
//! report that stored tier or a freshly derived one is a [`PriorityMode`]
//! decision made by the caller (usually from config).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError, ValidationError};
use crate::priority::{
    days_until_due, dueness_for, validate_hours, Dueness, DuenessStyle, PriorityInput, PriorityMode,
    PriorityTier,
};

/// Progress-derived status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    /// 0 is not started, 100 is completed, anything between is in progress.
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0 => AssignmentStatus::NotStarted,
            100 => AssignmentStatus::Completed,
            _ => AssignmentStatus::InProgress,
        }
    }
}

/// A file attached to an assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size_bytes: u64,
    pub file_type: String,
    pub uploaded_on: NaiveDate,
}

impl Attachment {
    pub fn new(name: impl Into<String>, size_bytes: u64, uploaded_on: NaiveDate) -> Self {
        let name = name.into();
        let file_type = file_type_of(&name);
        Self {
            name,
            size_bytes,
            file_type,
            uploaded_on,
        }
    }

    /// Size in megabytes with one decimal, e.g. "2.4 MB".
    pub fn display_size(&self) -> String {
        format!("{:.1} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// Lowercased extension, or "unknown" when the name has none.
pub fn file_type_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => "unknown".to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub hours_to_complete: f64,
    pub is_graded: bool,
    #[serde(default)]
    pub max_marks: u32,
    /// Tier computed at creation or at the last explicit refresh.
    pub priority: PriorityTier,
    #[serde(default)]
    pub status: AssignmentStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub files: Vec<Attachment>,
    #[serde(default)]
    pub notes: String,
    pub created_on: NaiveDate,
}

impl Assignment {
    pub fn priority_input(&self) -> PriorityInput {
        PriorityInput {
            due_date: self.due_date,
            max_marks: self.max_marks,
            hours_to_complete: self.hours_to_complete,
            is_graded: self.is_graded,
        }
    }

    /// Tier reported under the given mode.
    pub fn effective_priority(&self, today: NaiveDate, mode: PriorityMode) -> PriorityTier {
        match mode {
            PriorityMode::Stored => self.priority,
            PriorityMode::Recompute => self.priority_input().tier(today),
        }
    }

    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        days_until_due(self.due_date, today)
    }

    pub fn dueness(&self, today: NaiveDate, style: DuenessStyle) -> Dueness {
        dueness_for(self.due_date, today, style)
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssignmentStatus::Completed
    }

    /// "100 marks" or "Not graded".
    pub fn grading_label(&self) -> String {
        if self.is_graded {
            format!("{} marks", self.max_marks)
        } else {
            "Not graded".to_string()
        }
    }
}

/// Input for a new assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub hours_to_complete: f64,
    pub is_graded: bool,
    pub max_marks: u32,
}

impl NewAssignment {
    pub fn new(title: impl Into<String>, subject: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            description: String::new(),
            due_date,
            hours_to_complete: 1.0,
            is_graded: true,
            max_marks: 100,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.hours_to_complete = hours;
        self
    }

    pub fn with_marks(mut self, max_marks: u32) -> Self {
        self.max_marks = max_marks;
        self
    }

    pub fn ungraded(mut self) -> Self {
        self.is_graded = false;
        self
    }

    /// Tier the draft would get if added today.
    pub fn preview_priority(&self, today: NaiveDate) -> PriorityTier {
        PriorityInput {
            due_date: self.due_date,
            max_marks: self.max_marks,
            hours_to_complete: self.hours_to_complete,
            is_graded: self.is_graded,
        }
        .tier(today)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }
        validate_hours(self.hours_to_complete)?;
        Ok(())
    }
}

/// In-memory assignment list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentStore {
    assignments: Vec<Assignment>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, compute its tier and append it.
    ///
    /// # Errors
    /// Returns a validation error if title or subject is blank or the effort
    /// estimate is not a positive number.
    pub fn add(&mut self, draft: NewAssignment, today: NaiveDate) -> Result<&Assignment> {
        draft.validate()?;
        let priority = draft.preview_priority(today);

        let assignment = Assignment {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            subject: draft.subject,
            description: draft.description,
            due_date: draft.due_date,
            hours_to_complete: draft.hours_to_complete,
            is_graded: draft.is_graded,
            max_marks: draft.max_marks,
            priority,
            status: AssignmentStatus::NotStarted,
            progress: 0,
            files: Vec::new(),
            notes: String::new(),
            created_on: today,
        };
        tracing::debug!(id = %assignment.id, %priority, "assignment added");
        self.assignments.push(assignment);
        Ok(&self.assignments[self.assignments.len() - 1])
    }

    pub fn get(&self, id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Assignment, StoreError> {
        self.assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("Assignment", id))
    }

    pub fn list(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn remove(&mut self, id: &str) -> Result<Assignment> {
        let index = self
            .assignments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("Assignment", id))?;
        Ok(self.assignments.remove(index))
    }

    /// Set progress (0-100) and derive the status from it.
    pub fn update_progress(&mut self, id: &str, progress: u32) -> Result<AssignmentStatus> {
        if progress > 100 {
            return Err(ValidationError::ProgressOutOfRange(progress).into());
        }
        let assignment = self.get_mut(id)?;
        assignment.progress = progress as u8;
        assignment.status = AssignmentStatus::from_progress(assignment.progress);
        tracing::debug!(id, progress, status = ?assignment.status, "progress updated");
        Ok(assignment.status)
    }

    pub fn update_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.notes = notes.into();
        Ok(())
    }

    pub fn add_file(
        &mut self,
        id: &str,
        name: impl Into<String>,
        size_bytes: u64,
        today: NaiveDate,
    ) -> Result<&Attachment> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        let assignment = self.get_mut(id)?;
        assignment.files.push(Attachment::new(name, size_bytes, today));
        let last = assignment.files.len() - 1;
        Ok(&assignment.files[last])
    }

    /// Remove every attachment with this name.
    pub fn remove_file(&mut self, id: &str, name: &str) -> Result<()> {
        let assignment = self.get_mut(id)?;
        let before = assignment.files.len();
        assignment.files.retain(|f| f.name != name);
        if assignment.files.len() == before {
            return Err(StoreError::FileNotFound {
                assignment_id: id.to_string(),
                name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn effective_priority(
        &self,
        id: &str,
        today: NaiveDate,
        mode: PriorityMode,
    ) -> Result<PriorityTier> {
        self.get(id)
            .map(|a| a.effective_priority(today, mode))
            .ok_or_else(|| StoreError::not_found("Assignment", id).into())
    }

    /// Re-derive every stored tier. Returns how many changed.
    pub fn refresh_priorities(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for assignment in &mut self.assignments {
            let fresh = assignment.priority_input().tier(today);
            if fresh != assignment.priority {
                tracing::debug!(
                    id = %assignment.id,
                    from = %assignment.priority,
                    to = %fresh,
                    "priority refreshed"
                );
                assignment.priority = fresh;
                changed += 1;
            }
        }
        changed
    }

    /// Highest tier first, then earliest due date.
    pub fn sorted_by_priority(&self, today: NaiveDate, mode: PriorityMode) -> Vec<&Assignment> {
        let mut sorted: Vec<&Assignment> = self.assignments.iter().collect();
        sorted.sort_by(|a, b| {
            b.effective_priority(today, mode)
                .cmp(&a.effective_priority(today, mode))
                .then(a.due_date.cmp(&b.due_date))
        });
        sorted
    }

    /// Incomplete assignments due within `within_days` of today, overdue included.
    pub fn upcoming(&self, today: NaiveDate, within_days: i64) -> Vec<&Assignment> {
        let mut upcoming: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| !a.is_completed() && a.days_until_due(today) <= within_days)
            .collect();
        upcoming.sort_by_key(|a| a.due_date);
        upcoming
    }
}
