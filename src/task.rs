//! Task data structure and identifier normalisation.
//!
//! Stored boards may carry ids as JSON numbers or strings. Both are folded
//! into a single canonical string form at deserialisation time so that every
//! later comparison is a plain equality check.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::{Status, TaskStatus};

/// Canonical task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it has one.
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId(n.to_string())
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.trim().to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::from(s.as_str())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            UInt(u64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => TaskId(n.to_string()),
            RawId::UInt(n) => TaskId(n.to_string()),
            // f64 Display drops a zero fraction, so 7.0 and 7 agree.
            RawId::Float(n) => TaskId(n.to_string()),
            RawId::Text(s) => TaskId::from(s),
        })
    }
}

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: u64, title: &str, description: &str, status: Status) -> Self {
        Self {
            id: TaskId::from(id),
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::Known(status),
        }
    }
}
