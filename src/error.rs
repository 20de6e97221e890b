//! Error types surfaced by board operations.

use std::path::PathBuf;

use crate::storage::StorageError;
use crate::task::TaskId;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialise tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to read seed file {path}: {reason}")]
    Seed { path: PathBuf, reason: String },

    #[error("Title is required")]
    TitleRequired,

    #[error("Task {0} not found")]
    NotFound(TaskId),

    #[error("The task form is not open")]
    ModalClosed,

    #[error("terminal error: {0}")]
    Terminal(#[source] std::io::Error),
}
