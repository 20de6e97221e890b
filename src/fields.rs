//! Enumerations and field types for the task board.
//!
//! This module defines the status values that place a task in one of the
//! three board columns, and the lenient wrapper used when a stored status
//! is not one the board knows about.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Column a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[serde(alias = "TODO")]
    Todo,
    #[serde(alias = "DOING")]
    Doing,
    #[serde(alias = "DONE")]
    Done,
}

impl Status {
    /// All statuses in board order, left to right.
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    /// Column heading label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Doing => "DOING",
            Status::Done => "DONE",
        }
    }

    /// Stored form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Position of the column on the board.
    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::Doing => 1,
            Status::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Status::ALL.get(index).copied()
    }

    /// Neighbouring column, clamped at the board edges.
    pub fn shifted(self, right: bool) -> Status {
        let idx = self.index();
        if right {
            Status::from_index(idx + 1).unwrap_or(self)
        } else if idx == 0 {
            self
        } else {
            Status::from_index(idx - 1).unwrap_or(self)
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status as found in storage.
///
/// Anything other than the three known values is kept verbatim so the task
/// survives a save/load cycle even though it never reaches a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskStatus {
    Known(Status),
    Unrecognized(String),
}

impl TaskStatus {
    pub fn known(&self) -> Option<Status> {
        match self {
            TaskStatus::Known(s) => Some(*s),
            TaskStatus::Unrecognized(_) => None,
        }
    }
}

impl From<Status> for TaskStatus {
    fn from(s: Status) -> Self {
        TaskStatus::Known(s)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Known(s) => s.fmt(f),
            TaskStatus::Unrecognized(raw) => f.write_str(raw),
        }
    }
}
