//! Enumerations for TUI state management.

/// Screen the board application is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Board,
    TaskForm,
    ConfirmDelete,
    Help,
}
