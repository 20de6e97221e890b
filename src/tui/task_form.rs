//! Add/edit task form and the controller that opens, closes and submits it.
//!
//! The form keeps its field values when closed; the next `open` overwrites
//! them. A controller without a form (`ModalController::detached`) accepts
//! every call and does nothing.

use crate::error::BoardError;
use crate::fields::Status;
use crate::task::{Task, TaskId};
use crate::tui::input::InputField;

/// Focus order of the editable fields.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const STATUS_FIELD: usize = 2;
const FIELD_COUNT: usize = 3;

pub const ADD_TITLE: &str = "Add New Task";
pub const EDIT_TITLE: &str = "Edit Task";

/// Whether the open form creates a task or edits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(ModalMode),
}

/// Validated form contents, ready to be applied to the board.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    /// Set when editing an existing task.
    pub id: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub status: Status,
}

/// Task form fields.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub modal_title: String,
    /// Hidden; identifies the task being edited.
    pub task_id: InputField,
    pub title: InputField,
    pub description: InputField,
    pub status: usize,
    pub statuses: Vec<Status>,
    pub current_field: usize,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            modal_title: ADD_TITLE.to_string(),
            task_id: InputField::new(),
            title: InputField::new(),
            description: InputField::new(),
            status: 0,
            statuses: Status::ALL.to_vec(),
            current_field: TITLE_FIELD,
        }
    }

    fn populate(&mut self, task: Option<&Task>) {
        match task {
            Some(task) => {
                self.modal_title = EDIT_TITLE.to_string();
                self.task_id.set(task.id.as_str());
                self.title.set(&task.title);
                self.description.set(&task.description);
                self.status = task
                    .status
                    .known()
                    .and_then(|s| self.statuses.iter().position(|&x| x == s))
                    .unwrap_or(0);
            }
            None => {
                self.modal_title = ADD_TITLE.to_string();
                self.task_id.clear();
                self.title.clear();
                self.description.clear();
                self.status = 0;
            }
        }
        self.current_field = TITLE_FIELD;
    }

    pub fn selected_status(&self) -> Status {
        self.statuses.get(self.status).copied().unwrap_or(Status::Todo)
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
    }

    /// The text field that has focus, if focus is on one.
    pub fn active_input(&self) -> Option<&InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&self.title),
            DESCRIPTION_FIELD => Some(&self.description),
            _ => None,
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input_mut() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input_mut() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input_mut() {
            field.handle_delete();
        }
    }

    /// Move the cursor, or cycle the status selector when it has focus.
    pub fn handle_left_right(&mut self, right: bool) {
        if self.current_field == STATUS_FIELD {
            let n = self.statuses.len();
            self.status = if right {
                (self.status + 1) % n
            } else if self.status == 0 {
                n - 1
            } else {
                self.status - 1
            };
            return;
        }
        if let Some(field) = self.active_input_mut() {
            if right {
                field.move_cursor_right();
            } else {
                field.move_cursor_left();
            }
        }
    }

    fn draft(&self) -> Result<TaskDraft, BoardError> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err(BoardError::TitleRequired);
        }
        let id = self.task_id.value.trim();
        Ok(TaskDraft {
            id: if id.is_empty() { None } else { Some(TaskId::from(id)) },
            title: title.to_string(),
            description: self.description.value.trim().to_string(),
            status: self.selected_status(),
        })
    }
}

/// Open/closed state of the task form.
#[derive(Debug, Clone)]
pub struct ModalController {
    form: Option<TaskForm>,
    state: ModalState,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            form: Some(TaskForm::new()),
            state: ModalState::Closed,
        }
    }

    /// A controller with no form attached.
    pub fn detached() -> Self {
        Self {
            form: None,
            state: ModalState::Closed,
        }
    }

    /// Show the form, populated from `task` (edit) or blank (add).
    pub fn open(&mut self, task: Option<&Task>) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        form.populate(task);
        self.state = ModalState::Open(if task.is_some() {
            ModalMode::Edit
        } else {
            ModalMode::Add
        });
    }

    /// Hide the form. Field values are kept.
    pub fn close(&mut self) {
        if self.form.is_some() {
            self.state = ModalState::Closed;
        }
    }

    /// Validate the open form.
    ///
    /// The form stays open either way; the caller closes it once the draft
    /// has been applied.
    pub fn submit(&self) -> Result<TaskDraft, BoardError> {
        match (&self.form, self.state) {
            (Some(form), ModalState::Open(_)) => form.draft(),
            _ => Err(BoardError::ModalClosed),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.form.as_mut()
    }
}
