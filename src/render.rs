//! Projection of the task list onto the three board columns.
//!
//! Every render rebuilds each column from scratch; there is no diffing.

use crate::db::{count_status, format_heading};
use crate::fields::Status;
use crate::task::{Task, TaskId};

/// A rendered task.
///
/// Holds the task as it was when the board was drawn, which is what the edit
/// form is opened with when the card is activated.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    task: Task,
}

impl Card {
    pub fn title(&self) -> &str {
        &self.task.title
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task.id
    }

    pub fn task(&self) -> &Task {
        &self.task
    }
}

/// One status column with its heading and cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: Status,
    pub heading: String,
    pub cards: Vec<Card>,
}

impl Column {
    fn new(status: Status) -> Self {
        Self {
            status,
            heading: status.label().to_string(),
            cards: Vec::new(),
        }
    }
}

/// The columns a board is drawn into.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    columns: Vec<Column>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView {
    /// A view with all three columns.
    pub fn new() -> Self {
        Self::with_columns(&Status::ALL)
    }

    /// A view holding only the given columns.
    pub fn with_columns(statuses: &[Status]) -> Self {
        Self {
            columns: statuses.iter().map(|&s| Column::new(s)).collect(),
        }
    }

    pub fn column(&self, status: Status) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == status)
    }

    fn column_mut(&mut self, status: Status) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.status == status)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Card at `index` in the given column.
    pub fn card(&self, status: Status, index: usize) -> Option<&Card> {
        self.column(status)?.cards.get(index)
    }

    pub fn card_count(&self, status: Status) -> usize {
        self.column(status).map_or(0, |c| c.cards.len())
    }
}

/// Rebuild every column of `view` from `tasks`.
///
/// Tasks whose status is unrecognized, or whose column is missing from the
/// view, are skipped with a warning.
pub fn render(tasks: &[Task], view: &mut BoardView) {
    for status in Status::ALL {
        if let Some(column) = view.column_mut(status) {
            column.cards.clear();
        }
    }

    for task in tasks {
        let Some(status) = task.status.known() else {
            tracing::warn!(id = %task.id, status = %task.status, "task has unknown status, not shown");
            continue;
        };
        match view.column_mut(status) {
            Some(column) => column.cards.push(Card { task: task.clone() }),
            None => {
                tracing::warn!(id = %task.id, "no column for status {status}, task not shown");
            }
        }
    }

    for status in Status::ALL {
        if let Some(column) = view.column_mut(status) {
            column.heading = format_heading(status, count_status(tasks, status));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TaskStatus;

    fn tasks_with(statuses: &[&str]) -> Vec<Task> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Task {
                id: TaskId::from(i as u64 + 1),
                title: format!("task {}", i + 1),
                description: String::new(),
                status: serde_json::from_value(serde_json::Value::String(s.to_string())).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_render_partitions_by_status() {
        let tasks = tasks_with(&["todo", "doing", "done", "doing"]);
        let mut view = BoardView::new();
        render(&tasks, &mut view);

        assert_eq!(view.card_count(Status::Todo), 1);
        assert_eq!(view.card_count(Status::Doing), 2);
        assert_eq!(view.card_count(Status::Done), 1);
        assert_eq!(view.column(Status::Todo).unwrap().heading, "TODO (1)");
        assert_eq!(view.column(Status::Doing).unwrap().heading, "DOING (2)");
        assert_eq!(view.column(Status::Done).unwrap().heading, "DONE (1)");

        let doing: Vec<&str> = view.column(Status::Doing).unwrap().cards.iter().map(|c| c.title()).collect();
        assert_eq!(doing, ["task 2", "task 4"]);
        assert_eq!(view.card(Status::Done, 0).unwrap().task_id().as_str(), "3");
    }

    #[test]
    fn test_render_rebuilds_instead_of_appending() {
        let mut tasks = tasks_with(&["todo", "todo"]);
        let mut view = BoardView::new();
        render(&tasks, &mut view);
        tasks.pop();
        render(&tasks, &mut view);
        assert_eq!(view.card_count(Status::Todo), 1);
        assert_eq!(view.column(Status::Todo).unwrap().heading, "TODO (1)");
    }

    #[test]
    fn test_unknown_status_is_skipped() {
        let tasks = tasks_with(&["todo", "blocked", "done"]);
        assert_eq!(tasks[1].status, TaskStatus::Unrecognized("blocked".into()));

        let mut view = BoardView::new();
        render(&tasks, &mut view);
        let shown: usize = Status::ALL.iter().map(|&s| view.card_count(s)).sum();
        assert_eq!(shown, 2);
        assert_eq!(view.card_count(Status::Done), 1);
    }

    #[test]
    fn test_missing_column_skips_its_cards_only() {
        let tasks = tasks_with(&["todo", "doing", "done"]);
        let mut view = BoardView::with_columns(&[Status::Todo, Status::Done]);
        render(&tasks, &mut view);

        assert!(view.column(Status::Doing).is_none());
        assert_eq!(view.card_count(Status::Todo), 1);
        assert_eq!(view.card_count(Status::Done), 1);
        assert_eq!(view.column(Status::Done).unwrap().heading, "DONE (1)");
    }
}
