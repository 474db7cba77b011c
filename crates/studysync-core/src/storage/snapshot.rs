//! JSON persistence of workspace state.
//!
//! The CLI loads the snapshot at the start of each invocation and writes it
//! back after a successful mutation. Stored at `<data_dir>/workspace.json`.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::workspace::WorkspaceData;

#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot in the default data directory.
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::new(data_dir()?.join("workspace.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved state. A missing file is an empty workspace.
    pub fn load(&self) -> Result<WorkspaceData> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let data = serde_json::from_str(&content)?;
                tracing::debug!(path = %self.path.display(), "snapshot loaded");
                Ok(data)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(WorkspaceData::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temporary file so a crash never leaves half a snapshot.
    pub fn save(&self, data: &WorkspaceData) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::NewAssignment;
    use crate::error::CoreError;
    use chrono::NaiveDate;

    #[test]
    fn missing_file_is_empty_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().join("workspace.json"));
        let data = snapshot.load().unwrap();
        assert!(data.assignments.is_empty());
        assert!(data.timer.is_none());
    }

    #[test]
    fn save_then_load_keeps_stored_tier() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().join("workspace.json"));
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let mut data = WorkspaceData::default();
        let id = data
            .assignments
            .add(NewAssignment::new("Lab report", "Chemistry", today).with_hours(8.0), today)
            .unwrap()
            .id
            .clone();
        snapshot.save(&data).unwrap();
        assert!(!dir.path().join("workspace.json.tmp").exists());

        let loaded = snapshot.load().unwrap();
        let assignment = loaded.assignments.get(&id).unwrap();
        assert_eq!(assignment.priority, data.assignments.get(&id).unwrap().priority);
        assert_eq!(assignment.due_date, today);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Snapshot::new(path).load(), Err(CoreError::Json(_))));
    }
}
