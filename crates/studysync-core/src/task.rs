//! To-do tasks with a user-chosen priority.
//!
//! Unlike assignments, a task's tier is picked by the user and never scored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError, ValidationError};
use crate::priority::PriorityTier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subject: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: PriorityTier,
    #[serde(default)]
    pub completed: bool,
    pub created_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subject: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: PriorityTier,
}

impl NewTask {
    pub fn new(title: impl Into<String>, subject: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            subject: subject.into(),
            due_date,
            priority: PriorityTier::Medium,
        }
    }

    pub fn with_priority(mut self, priority: PriorityTier) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns a validation error if the title or subject is blank.
    pub fn add(&mut self, draft: NewTask, today: NaiveDate) -> Result<&Task> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        if draft.subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject").into());
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            subject: draft.subject,
            due_date: draft.due_date,
            priority: draft.priority,
            completed: false,
            created_on: today,
        };
        tracing::debug!(id = %task.id, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Flip completion. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        Ok(self.tasks.remove(index))
    }

    pub fn active(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
    }

    #[test]
    fn toggle_moves_between_active_and_completed() {
        let mut store = TaskStore::new();
        let id = store
            .add(
                NewTask::new("History Essay", "History", today()).with_priority(PriorityTier::High),
                today(),
            )
            .unwrap()
            .id
            .clone();
        store
            .add(NewTask::new("Read Chapter 3", "Biology", today()), today())
            .unwrap();

        assert_eq!(store.active().len(), 2);
        assert!(store.toggle(&id).unwrap());
        assert_eq!(store.active().len(), 1);
        assert_eq!(store.completed()[0].id, id);
        assert!(!store.toggle(&id).unwrap());
        assert!(store.completed().is_empty());
    }

    #[test]
    fn add_requires_subject() {
        let mut store = TaskStore::new();
        assert!(store.add(NewTask::new("Essay", "", today()), today()).is_err());
    }

    #[test]
    fn delete_unknown_fails() {
        let mut store = TaskStore::new();
        assert!(store.delete("nope").is_err());
        let id = store
            .add(NewTask::new("Lab", "Chemistry", today()), today())
            .unwrap()
            .id
            .clone();
        assert_eq!(store.delete(&id).unwrap().title, "Lab");
        assert!(store.list().is_empty());
    }
}
