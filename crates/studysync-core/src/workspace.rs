//! The application shell object.
//!
//! A [`Workspace`] owns every store, the configuration and a clock. Front
//! ends mutate through it, then drain [`Event`]s with
//! [`Workspace::take_events`] and re-render.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::assignment::{Assignment, AssignmentStatus, AssignmentStore, Attachment, NewAssignment};
use crate::budget::{Ledger, NewTransaction, Transaction};
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError, ValidationError};
use crate::events::Event;
use crate::notes::{FolderMaterial, NewNote, Note, Notebook};
use crate::priority::PriorityTier;
use crate::search::{self, SearchResult, SearchSources};
use crate::storage::Config;
use crate::study::{Goal, NewStudySession, SessionKind, SessionTimer, StudyLog, StudySession};
use crate::task::{NewTask, Task, TaskStore};
use crate::timetable::{ClassSlot, NewClassSlot, NewSubject, Subject, SubjectCatalog, Timetable};

/// Serializable state of a workspace, as written by the snapshot store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceData {
    #[serde(default)]
    pub assignments: AssignmentStore,
    #[serde(default)]
    pub tasks: TaskStore,
    #[serde(default)]
    pub ledger: Ledger,
    #[serde(default)]
    pub study: StudyLog,
    #[serde(default)]
    pub timetable: Timetable,
    #[serde(default)]
    pub subjects: SubjectCatalog,
    #[serde(default)]
    pub notebook: Notebook,
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Running study timer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<SessionTimer>,
}

/// An assignment line on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingAssignment {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub due_date: NaiveDate,
    pub priority: PriorityTier,
    pub dueness: String,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    pub upcoming_assignments: Vec<UpcomingAssignment>,
    pub balance: f64,
    pub today_study_minutes: u32,
    pub weekly_study_minutes: u32,
    pub weekly_goal_minutes: u32,
    pub weekly_goal_progress: f64,
    pub todays_classes: Vec<ClassSlot>,
}

pub struct Workspace {
    data: WorkspaceData,
    config: Config,
    clock: Box<dyn Clock>,
    events: Vec<Event>,
}

impl Workspace {
    /// Empty workspace on the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_data(WorkspaceData::default(), config, Box::new(SystemClock))
    }

    /// Open existing state. Stored tiers are refreshed first when
    /// `priority.refresh_on_open` is set.
    pub fn with_data(data: WorkspaceData, config: Config, clock: Box<dyn Clock>) -> Self {
        let mut workspace = Self {
            data,
            config,
            clock,
            events: Vec::new(),
        };
        if workspace.config.priority.refresh_on_open {
            workspace.refresh_priorities();
        }
        workspace
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data(&self) -> &WorkspaceData {
        &self.data
    }

    pub fn into_data(self) -> WorkspaceData {
        self.data
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ---- assignments ----

    pub fn assignments(&self) -> &AssignmentStore {
        &self.data.assignments
    }

    pub fn add_assignment(&mut self, draft: NewAssignment) -> Result<&Assignment> {
        let (today, at) = (self.today(), self.now());
        let assignment = self.data.assignments.add(draft, today)?;
        self.events.push(Event::AssignmentAdded {
            id: assignment.id.clone(),
            priority: assignment.priority,
            at,
        });
        Ok(assignment)
    }

    pub fn remove_assignment(&mut self, id: &str) -> Result<Assignment> {
        let removed = self.data.assignments.remove(id)?;
        self.events.push(Event::AssignmentRemoved {
            id: removed.id.clone(),
            at: self.clock.now(),
        });
        Ok(removed)
    }

    pub fn update_progress(&mut self, id: &str, progress: u32) -> Result<AssignmentStatus> {
        let status = self.data.assignments.update_progress(id, progress)?;
        self.events.push(Event::ProgressUpdated {
            id: id.to_string(),
            progress,
            status,
            at: self.clock.now(),
        });
        Ok(status)
    }

    pub fn update_assignment_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<()> {
        self.data.assignments.update_notes(id, notes)
    }

    pub fn attach_file(
        &mut self,
        id: &str,
        name: impl Into<String>,
        size_bytes: u64,
    ) -> Result<&Attachment> {
        let today = self.today();
        self.data.assignments.add_file(id, name, size_bytes, today)
    }

    pub fn detach_file(&mut self, id: &str, name: &str) -> Result<()> {
        self.data.assignments.remove_file(id, name)
    }

    /// Tier under the configured `priority.mode`.
    pub fn assignment_priority(&self, id: &str) -> Result<PriorityTier> {
        self.data
            .assignments
            .effective_priority(id, self.today(), self.config.priority.mode)
    }

    pub fn assignments_by_priority(&self) -> Vec<&Assignment> {
        self.data
            .assignments
            .sorted_by_priority(self.today(), self.config.priority.mode)
    }

    /// Re-derive stored tiers against today. Returns how many moved.
    pub fn refresh_priorities(&mut self) -> usize {
        let today = self.today();
        let changed = self.data.assignments.refresh_priorities(today);
        tracing::info!(changed, %today, "assignment priorities refreshed");
        self.events.push(Event::PrioritiesRefreshed {
            changed,
            at: self.clock.now(),
        });
        changed
    }

    // ---- tasks ----

    pub fn tasks(&self) -> &TaskStore {
        &self.data.tasks
    }

    pub fn add_task(&mut self, draft: NewTask) -> Result<&Task> {
        let (today, at) = (self.today(), self.now());
        let task = self.data.tasks.add(draft, today)?;
        self.events.push(Event::TaskAdded {
            id: task.id.clone(),
            at,
        });
        Ok(task)
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let completed = self.data.tasks.toggle(id)?;
        self.events.push(Event::TaskToggled {
            id: id.to_string(),
            completed,
            at: self.clock.now(),
        });
        Ok(completed)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let task = self.data.tasks.delete(id)?;
        self.events.push(Event::TaskDeleted {
            id: task.id.clone(),
            at: self.clock.now(),
        });
        Ok(task)
    }

    // ---- budget ----

    pub fn ledger(&self) -> &Ledger {
        &self.data.ledger
    }

    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<&Transaction> {
        let at = self.now();
        let transaction = self.data.ledger.add(draft)?;
        self.events.push(Event::TransactionAdded {
            id: transaction.id.clone(),
            kind: transaction.kind,
            amount: transaction.amount,
            at,
        });
        Ok(transaction)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let transaction = self.data.ledger.delete(id)?;
        self.events.push(Event::TransactionDeleted {
            id: transaction.id.clone(),
            at: self.clock.now(),
        });
        Ok(transaction)
    }

    // ---- study ----

    pub fn study(&self) -> &StudyLog {
        &self.data.study
    }

    pub fn log_session(&mut self, draft: NewStudySession) -> Result<&StudySession> {
        let at = self.now();
        let session = self.data.study.add(draft)?;
        self.events.push(Event::SessionLogged {
            id: session.id.clone(),
            minutes: session.duration_minutes,
            at,
        });
        Ok(session)
    }

    pub fn delete_session(&mut self, id: &str) -> Result<StudySession> {
        self.data.study.delete(id)
    }

    pub fn timer(&self) -> Option<&SessionTimer> {
        self.data.timer.as_ref()
    }

    /// # Errors
    /// Fails if a timer is already running or the subject is blank.
    pub fn start_timer(
        &mut self,
        subject: impl Into<String>,
        kind: SessionKind,
    ) -> Result<&SessionTimer> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject").into());
        }
        if let Some(running) = &self.data.timer {
            return Err(ValidationError::invalid(
                "timer",
                format!("already running for '{}'", running.subject),
            )
            .into());
        }
        let timer = SessionTimer::start(subject, kind, self.clock.now());
        Ok(&*self.data.timer.insert(timer))
    }

    /// Stop the running timer and log its session. A timer stopped before a
    /// full minute is discarded.
    pub fn stop_timer(&mut self) -> Result<&StudySession> {
        let timer = self
            .data
            .timer
            .take()
            .ok_or_else(|| StoreError::not_found("Timer", "running"))?;
        let draft = timer.stop(self.clock.now())?;
        self.log_session(draft)
    }

    /// Weekly goal from `study.weekly_goal_hours`, as a percentage.
    pub fn weekly_goal_progress(&self) -> f64 {
        self.data
            .study
            .weekly_goal_progress(self.today(), self.config.weekly_goal_minutes())
    }

    pub fn goals(&self) -> &[Goal] {
        &self.data.goals
    }

    /// Insert or replace the goal with the same title.
    pub fn set_goal(&mut self, goal: Goal) -> Result<&Goal> {
        if goal.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        let index = match self.data.goals.iter().position(|g| g.title == goal.title) {
            Some(index) => {
                self.data.goals[index] = goal;
                index
            }
            None => {
                self.data.goals.push(goal);
                self.data.goals.len() - 1
            }
        };
        Ok(&self.data.goals[index])
    }

    pub fn remove_goal(&mut self, title: &str) -> Result<Goal> {
        let index = self
            .data
            .goals
            .iter()
            .position(|g| g.title == title)
            .ok_or_else(|| StoreError::not_found("Goal", title))?;
        Ok(self.data.goals.remove(index))
    }

    // ---- timetable ----

    pub fn timetable(&self) -> &Timetable {
        &self.data.timetable
    }

    pub fn add_class(&mut self, draft: NewClassSlot) -> Result<&ClassSlot> {
        let at = self.now();
        let slot = self.data.timetable.add(draft)?;
        self.events.push(Event::ClassScheduled {
            id: slot.id.clone(),
            at,
        });
        Ok(slot)
    }

    pub fn update_class(&mut self, id: &str, draft: NewClassSlot) -> Result<&ClassSlot> {
        self.data.timetable.update(id, draft)
    }

    pub fn remove_class(&mut self, id: &str) -> Result<ClassSlot> {
        self.data.timetable.remove(id)
    }

    pub fn todays_classes(&self) -> Vec<&ClassSlot> {
        self.data.timetable.today(self.clock.as_ref())
    }

    pub fn subjects(&self) -> &SubjectCatalog {
        &self.data.subjects
    }

    pub fn add_subject(&mut self, draft: NewSubject) -> Result<&Subject> {
        self.data.subjects.add(draft)
    }

    pub fn update_subject(&mut self, id: &str, draft: NewSubject) -> Result<&Subject> {
        self.data.subjects.update(id, draft)
    }

    pub fn remove_subject(&mut self, id: &str) -> Result<Subject> {
        self.data.subjects.remove(id)
    }

    // ---- notes ----

    pub fn notebook(&self) -> &Notebook {
        &self.data.notebook
    }

    pub fn add_note(&mut self, draft: NewNote) -> Result<&Note> {
        let at = self.now();
        let note = self.data.notebook.add(draft)?;
        self.events.push(Event::NoteAdded {
            id: note.id.clone(),
            at,
        });
        Ok(note)
    }

    pub fn toggle_note_star(&mut self, id: &str) -> Result<bool> {
        let starred = self.data.notebook.toggle_star(id)?;
        self.events.push(Event::NoteStarred {
            id: id.to_string(),
            starred,
            at: self.clock.now(),
        });
        Ok(starred)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<Note> {
        self.data.notebook.delete(id)
    }

    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        size_bytes: u64,
        subject: impl Into<String>,
    ) -> Result<&FolderMaterial> {
        let today = self.today();
        self.data.notebook.add_material(name, size_bytes, subject, today)
    }

    // ---- derived views ----

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let sources = SearchSources {
            tasks: self.data.tasks.list(),
            assignments: self.data.assignments.list(),
            classes: self.data.timetable.list(),
            subjects: self.data.subjects.list(),
            goals: &self.data.goals,
            notes: self.data.notebook.list(),
            transactions: self.data.ledger.list(),
        };
        search::search(
            &sources,
            query,
            self.today(),
            self.config.search.min_query_len,
            self.config.priority.mode,
        )
    }

    pub fn summary(&self) -> DashboardSummary {
        let today = self.today();
        let priority = &self.config.priority;
        let upcoming_assignments = self
            .data
            .assignments
            .upcoming(today, priority.upcoming_days)
            .into_iter()
            .map(|a| UpcomingAssignment {
                id: a.id.clone(),
                title: a.title.clone(),
                subject: a.subject.clone(),
                due_date: a.due_date,
                priority: a.effective_priority(today, priority.mode),
                dueness: a.dueness(today, priority.dueness_style).to_string(),
            })
            .collect();

        DashboardSummary {
            today,
            active_tasks: self.data.tasks.active().len(),
            completed_tasks: self.data.tasks.completed().len(),
            upcoming_assignments,
            balance: self.data.ledger.balance(),
            today_study_minutes: self.data.study.today_minutes(today),
            weekly_study_minutes: self.data.study.weekly_minutes(today),
            weekly_goal_minutes: self.config.weekly_goal_minutes(),
            weekly_goal_progress: self.weekly_goal_progress(),
            todays_classes: self.todays_classes().into_iter().cloned().collect(),
        }
    }
}
