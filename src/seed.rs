//! Seed dataset used when no board has been saved yet.

use std::fs;
use std::path::Path;

use crate::error::BoardError;
use crate::fields::Status;
use crate::task::Task;

/// Built-in starter board. Every call builds a fresh list.
pub fn initial_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Set up the repository", "Create the repo and push the first commit.", Status::Done),
        Task::new(2, "Write the README", "Describe installation and the key bindings.", Status::Doing),
        Task::new(3, "Sketch the board layout", "Three columns: todo, doing, done.", Status::Doing),
        Task::new(4, "Add keyboard shortcuts", "", Status::Todo),
        Task::new(5, "Persist tasks between sessions", "Save after every change.", Status::Todo),
        Task::new(6, "Ask for feedback", "", Status::Todo),
    ]
}

/// Read a seed list from a JSON file holding an array of tasks.
pub fn load_seed_file(path: &Path) -> Result<Vec<Task>, BoardError> {
    let data = fs::read_to_string(path).map_err(|e| BoardError::Seed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|e| BoardError::Seed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_initial_tasks_have_unique_ids() {
        let tasks = initial_tasks();
        let ids: HashSet<_> = tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn test_load_seed_file_reads_mixed_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, r#"[{"id":1,"title":"A","status":"todo"},{"id":"b","title":"B","status":"DONE"}]"#).unwrap();
        let tasks = load_seed_file(&path).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id.as_str(), "b");
        assert_eq!(tasks[1].status.known(), Some(Status::Done));
    }

    #[test]
    fn test_load_seed_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_seed_file(&path), Err(BoardError::Seed { .. })));
    }
}
