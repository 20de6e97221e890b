//! The task board: repository, persistence, rendered view and task form.
//!
//! Every mutation follows the same path: change the in-memory list, save the
//! whole list, then re-render every column.

use crate::db::Database;
use crate::error::BoardError;
use crate::fields::{Status, TaskStatus};
use crate::render::{render, BoardView};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::tui::task_form::{ModalController, TaskDraft};

pub struct Board {
    db: Database,
    store: TaskStore,
    view: BoardView,
    modal: ModalController,
}

impl Board {
    /// Load the saved tasks and draw them.
    pub fn open(store: TaskStore) -> Self {
        Self::with_parts(store, BoardView::new(), ModalController::new())
    }

    /// Build a board around a specific view and form.
    pub fn with_parts(store: TaskStore, view: BoardView, modal: ModalController) -> Self {
        let db = Database::new(store.load());
        let mut board = Self {
            db,
            store,
            view,
            modal,
        };
        board.refresh();
        board
    }

    pub fn tasks(&self) -> &[Task] {
        &self.db.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.db.get(id)
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalController {
        &mut self.modal
    }

    /// Redraw all columns from the current list.
    pub fn refresh(&mut self) {
        render(&self.db.tasks, &mut self.view);
    }

    fn commit(&mut self) -> Result<(), BoardError> {
        self.store.save(&self.db.tasks)?;
        self.refresh();
        Ok(())
    }

    /// Open the edit form for the card at `index` in a column.
    ///
    /// Returns false if there is no such card.
    pub fn activate_card(&mut self, status: Status, index: usize) -> bool {
        match self.view.card(status, index) {
            Some(card) => {
                self.modal.open(Some(card.task()));
                true
            }
            None => false,
        }
    }

    /// Open a blank form.
    pub fn open_add(&mut self) {
        self.modal.open(None);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Apply the open form to the board.
    ///
    /// On success the task is saved, the board redrawn and the form closed.
    /// On error the form stays open with its contents.
    pub fn submit_modal(&mut self) -> Result<Task, BoardError> {
        let draft = self.modal.submit()?;
        let task = self.apply_draft(draft)?;
        self.modal.close();
        Ok(task)
    }

    fn apply_draft(&mut self, draft: TaskDraft) -> Result<Task, BoardError> {
        match draft.id {
            Some(id) => self.update_task(&id, Some(draft.title), Some(draft.description), Some(draft.status)),
            None => self.add_task(&draft.title, &draft.description, draft.status),
        }
    }

    /// Append a new task with the next free id.
    pub fn add_task(&mut self, title: &str, description: &str, status: Status) -> Result<Task, BoardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::TitleRequired);
        }
        let task = Task {
            id: self.db.next_id(),
            title: title.to_string(),
            description: description.trim().to_string(),
            status: TaskStatus::Known(status),
        };
        self.db.upsert(task.clone());
        self.commit()?;
        tracing::info!(id = %task.id, "added task");
        Ok(task)
    }

    /// Change fields of an existing task, keeping its place in the list.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        title: Option<String>,
        description: Option<String>,
        status: Option<Status>,
    ) -> Result<Task, BoardError> {
        if let Some(t) = &title {
            if t.trim().is_empty() {
                return Err(BoardError::TitleRequired);
            }
        }
        let task = self.db.get_mut(id).ok_or_else(|| BoardError::NotFound(id.clone()))?;
        if let Some(t) = title {
            task.title = t.trim().to_string();
        }
        if let Some(d) = description {
            task.description = d.trim().to_string();
        }
        if let Some(s) = status {
            task.status = TaskStatus::Known(s);
        }
        let updated = task.clone();
        self.commit()?;
        tracing::info!(id = %id, "updated task");
        Ok(updated)
    }

    /// Put a task in another column.
    pub fn move_task(&mut self, id: &TaskId, status: Status) -> Result<(), BoardError> {
        if !self.db.set_status(id, status) {
            return Err(BoardError::NotFound(id.clone()));
        }
        self.commit()?;
        tracing::info!(id = %id, %status, "moved task");
        Ok(())
    }

    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task, BoardError> {
        let removed = self.db.remove(id).ok_or_else(|| BoardError::NotFound(id.clone()))?;
        self.commit()?;
        tracing::info!(id = %id, "deleted task");
        Ok(removed)
    }

    /// Forget the saved board and start again from seed data.
    pub fn reset(&mut self) -> Result<(), BoardError> {
        self.store.clear()?;
        self.db = Database::new(self.store.load());
        self.refresh();
        tracing::info!("board reset to seed data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_tasks;
    use crate::storage::{FileStorage, MemoryStorage, Storage};
    use crate::store::STORAGE_KEY;

    fn board_with(tasks: Vec<Task>) -> Board {
        let mut store = TaskStore::new(Box::new(MemoryStorage::new()), initial_tasks());
        store.save(&tasks).unwrap();
        Board::open(store)
    }

    fn file_board(dir: &std::path::Path) -> Board {
        Board::open(TaskStore::new(Box::new(FileStorage::new(dir)), initial_tasks()))
    }

    #[test]
    fn test_open_renders_loaded_tasks() {
        let board = board_with(vec![
            Task::new(1, "a", "", Status::Todo),
            Task::new(2, "b", "", Status::Doing),
        ]);
        assert_eq!(board.view().card_count(Status::Todo), 1);
        assert_eq!(board.view().column(Status::Doing).unwrap().heading, "DOING (1)");
    }

    #[test]
    fn test_add_via_form_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = file_board(dir.path());
        let before = board.tasks().len();

        board.open_add();
        let form = board.modal_mut().form_mut().unwrap();
        for c in "Write tests".chars() {
            form.handle_char(c);
        }
        let task = board.submit_modal().unwrap();

        assert_eq!(task.id, TaskId::from(7u64));
        assert_eq!(board.tasks().len(), before + 1);
        assert_eq!(board.tasks().last().unwrap().title, "Write tests");
        assert!(!board.modal().is_open());
        assert_eq!(board.view().column(Status::Todo).unwrap().heading, "TODO (4)");

        let reopened = file_board(dir.path());
        assert_eq!(reopened.tasks(), board.tasks());
    }

    #[test]
    fn test_edit_via_card_updates_in_place() {
        let mut board = board_with(vec![
            Task::new(1, "first", "", Status::Todo),
            Task::new(2, "second", "", Status::Todo),
        ]);
        assert!(board.activate_card(Status::Todo, 0));
        let form = board.modal_mut().form_mut().unwrap();
        form.title.set("first, edited");
        form.status = 2;
        let task = board.submit_modal().unwrap();

        assert_eq!(task.id, TaskId::from("1"));
        assert_eq!(board.tasks()[0].title, "first, edited");
        assert_eq!(board.tasks()[0].status.known(), Some(Status::Done));
        assert_eq!(board.view().card_count(Status::Done), 1);
        assert_eq!(board.view().card_count(Status::Todo), 1);
    }

    #[test]
    fn test_blank_title_keeps_form_open() {
        let mut board = board_with(vec![]);
        board.open_add();
        assert!(matches!(board.submit_modal(), Err(BoardError::TitleRequired)));
        assert!(board.modal().is_open());
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn test_activate_missing_card() {
        let mut board = board_with(vec![]);
        assert!(!board.activate_card(Status::Done, 0));
        assert!(!board.modal().is_open());
    }

    #[test]
    fn test_move_and_delete_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = file_board(dir.path());
        let id = TaskId::from("4");

        board.move_task(&id, Status::Doing).unwrap();
        assert_eq!(board.get(&id).unwrap().status.known(), Some(Status::Doing));

        let removed = board.delete_task(&TaskId::from("1")).unwrap();
        assert_eq!(removed.title, "Set up the repository");
        assert_eq!(board.view().card_count(Status::Done), 0);

        let reopened = file_board(dir.path());
        assert_eq!(reopened.tasks().len(), 5);
        assert_eq!(reopened.get(&id).unwrap().status.known(), Some(Status::Doing));
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let mut board = board_with(vec![]);
        let id = TaskId::from("nope");
        assert!(matches!(board.move_task(&id, Status::Done), Err(BoardError::NotFound(_))));
        assert!(matches!(board.delete_task(&id), Err(BoardError::NotFound(_))));
        assert!(matches!(
            board.update_task(&id, Some("t".into()), None, None),
            Err(BoardError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_status_survives_mutations() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                STORAGE_KEY,
                r#"[{"id":1,"title":"a","status":"blocked"},{"id":2,"title":"b","status":"todo"}]"#,
            )
            .unwrap();
        let mut board = Board::open(TaskStore::new(Box::new(storage), initial_tasks()));
        board.move_task(&TaskId::from("2"), Status::Done).unwrap();

        assert_eq!(board.tasks().len(), 2);
        assert_eq!(board.tasks()[0].status, TaskStatus::Unrecognized("blocked".into()));
        assert_eq!(board.view().card_count(Status::Done), 1);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut board = board_with(vec![Task::new(1, "only", "", Status::Todo)]);
        board.reset().unwrap();
        assert_eq!(board.tasks(), initial_tasks().as_slice());
    }
}
