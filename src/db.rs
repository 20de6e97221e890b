//! In-memory task repository and formatting helpers.
//!
//! `Database` holds the ordered task list the rest of the board reads and
//! writes. It does no persistence of its own; callers save through
//! `TaskStore` after each mutation.

use std::collections::HashSet;

use crate::fields::{Status, TaskStatus};
use crate::task::{Task, TaskId};

/// Find the first task with the given id.
pub fn find_by_id<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|t| &t.id == id)
}

/// In-memory store of board tasks in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Get a task by ID.
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        find_by_id(&self.tasks, id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        let idx = self.position(id)?;
        self.tasks.get_mut(idx)
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Generate the next available task ID.
    ///
    /// Non-numeric ids are ignored when picking the maximum. If the maximum
    /// is already `u64::MAX`, the lowest unused number is taken instead.
    pub fn next_id(&self) -> TaskId {
        let used: HashSet<u64> = self.tasks.iter().filter_map(|t| t.id.as_number()).collect();
        let max = used.iter().copied().max().unwrap_or(0);
        let next = max
            .checked_add(1)
            .or_else(|| (1..=u64::MAX).find(|n| !used.contains(n)))
            .unwrap_or(0);
        TaskId::from(next)
    }

    /// Replace the task with the same id in place, or append it.
    pub fn upsert(&mut self, task: Task) {
        match self.position(&task.id) {
            Some(idx) => self.tasks[idx] = task,
            None => self.tasks.push(task),
        }
    }

    /// Remove a task, returning it if it was present.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let idx = self.position(id)?;
        Some(self.tasks.remove(idx))
    }

    /// Set a task's status. Returns false if the task does not exist.
    pub fn set_status(&mut self, id: &TaskId, status: Status) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.status = TaskStatus::Known(status);
                true
            }
            None => false,
        }
    }
}

pub fn count_status(tasks: &[Task], status: Status) -> usize {
    tasks.iter().filter(|t| t.status.known() == Some(status)).count()
}

/// Column heading text, e.g. `DOING (2)`.
pub fn format_heading(status: Status, count: usize) -> String {
    format!("{} ({})", status.label(), count)
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print tasks as a plain table.
pub fn print_table(tasks: &[&Task]) {
    println!("{:<6} {:<8} {}", "ID", "Status", "Title");
    for t in tasks {
        println!(
            "{:<6} {:<8} {}",
            truncate(t.id.as_str(), 6),
            truncate(&t.status.to_string(), 8),
            t.title
        );
    }
}
