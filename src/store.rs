//! Persistence of the task list in a single storage slot.

use crate::error::BoardError;
use crate::storage::Storage;
use crate::task::Task;

/// Name of the slot that holds the serialised board.
pub const STORAGE_KEY: &str = "tasks";

/// Loads and saves the task list through a `Storage` backend, falling back to
/// a seed list when nothing usable is stored.
pub struct TaskStore {
    storage: Box<dyn Storage>,
    seed: Vec<Task>,
}

impl TaskStore {
    pub fn new(storage: Box<dyn Storage>, seed: Vec<Task>) -> Self {
        Self { storage, seed }
    }

    /// The seed list this store falls back to.
    pub fn seed(&self) -> &[Task] {
        &self.seed
    }

    /// Load the saved task list.
    ///
    /// Never fails: a missing, empty, unreadable or malformed slot yields a
    /// fresh copy of the seed list.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.storage.read(STORAGE_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                tracing::info!("no saved tasks, starting from seed data");
                return self.seed.clone();
            }
            Err(e) => {
                tracing::error!("failed to read tasks from storage, using seed data: {e}");
                return self.seed.clone();
            }
        };
        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(e) => {
                tracing::error!("failed to parse saved tasks, using seed data: {e}");
                self.seed.clone()
            }
        }
    }

    /// Replace the saved task list.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), BoardError> {
        let data = serde_json::to_string_pretty(tasks)?;
        self.storage.write(STORAGE_KEY, &data)?;
        Ok(())
    }

    /// Drop the saved list so the next load starts from seed data.
    pub fn clear(&mut self) -> Result<(), BoardError> {
        self.storage.remove(STORAGE_KEY)?;
        Ok(())
    }
}
