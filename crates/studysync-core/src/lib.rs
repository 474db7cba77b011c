//! # StudySync Core Library
//!
//! This library provides the core business logic for StudySync, a student
//! productivity toolkit. All operations are available through the
//! `studysync` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Priority engine**: pure scoring of assignments into high/medium/low
//!   tiers plus date-relative "dueness" facts. Today is always an input.
//! - **Stores**: assignments, tasks, budget ledger, study log, timetable,
//!   subject catalog and notebook, each an explicit in-memory store.
//! - **Workspace**: shell object owning the stores, config and a clock;
//!   mutations emit [`Event`]s for front ends to drain.
//! - **Storage**: TOML configuration and JSON workspace snapshots.
//! - **Outline generator**: async request/response contract with a
//!   pluggable backend.
//!
//! ## Key Components
//!
//! - [`compute_priority`]: the tier classifier
//! - [`Workspace`]: application shell
//! - [`Config`]: application configuration management
//! - [`OutlineBackend`]: trait for outline generation backends

pub mod assignment;
pub mod budget;
pub mod clock;
pub mod error;
pub mod events;
pub mod notes;
pub mod outline;
pub mod priority;
pub mod search;
pub mod storage;
pub mod study;
pub mod task;
pub mod timetable;
pub mod workspace;

pub use assignment::{Assignment, AssignmentStatus, AssignmentStore, NewAssignment};
pub use budget::{BudgetCategory, Ledger, NewTransaction, Transaction, TransactionKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{
    ConfigError, CoreError, GenerationError, InvalidDateError, StoreError, ValidationError,
};
pub use events::Event;
pub use notes::{EditorKind, NewNote, Note, Notebook};
pub use outline::{
    GeneratedOutline, OutlineBackend, OutlineGenerator, OutlineRequest, Provider, TemplateBackend,
};
pub use priority::{
    compute_priority, describe_dueness, days_until_due, parse_due_date, Dueness, DuenessStyle,
    PriorityMode, PriorityTier,
};
pub use search::{ResultKind, SearchResult};
pub use storage::{Config, Snapshot};
pub use study::{Goal, NewStudySession, SessionKind, SessionTimer, StudyLog};
pub use task::{NewTask, Task, TaskStore};
pub use timetable::{
    parse_clock_time, ClassSlot, NewClassSlot, NewSubject, SubjectCatalog, SubjectKind, Timetable,
};
pub use workspace::{DashboardSummary, Workspace, WorkspaceData};
