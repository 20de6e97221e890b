//! Main application logic for the terminal user interface.
//!
//! `App` wraps a `Board`, tracks which column and card are selected, maps
//! key presses onto board operations and draws the board, the task form and
//! the small confirm/help popups.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::Board;
use crate::fields::Status;
use crate::task::TaskId;
use crate::tui::{
    colors::{status_color, GOLD},
    enums::AppState,
    input::InputField,
    task_form::{TaskForm, DESCRIPTION_FIELD, STATUS_FIELD, TITLE_FIELD},
    utils::centered_rect,
};

const HELP_LINES: &[(&str, &str)] = &[
    ("← / →", "Select column"),
    ("↑ / ↓", "Select card"),
    ("Enter", "Edit selected card"),
    ("a", "Add a task"),
    ("d", "Delete selected card"),
    ("Ctrl+← / Ctrl+→", "Move card to the neighbouring column"),
    ("h", "Show this help"),
    ("q / Esc", "Quit"),
    ("", ""),
    ("In the form", ""),
    ("Tab / ↓, Shift+Tab / ↑", "Next / previous field"),
    ("← / →", "Move cursor, or change status"),
    ("Enter", "Save"),
    ("Esc", "Close without saving"),
];

/// Screen position for a text cursor `cursor` chars into a wrapped input
/// drawn inside the bordered `rect`. `None` when it falls below the box.
fn cursor_position(rect: Rect, cursor: usize) -> Option<(u16, u16)> {
    let width = usize::from(rect.width.saturating_sub(2).max(1));
    let col = u16::try_from(cursor % width).unwrap_or(u16::MAX);
    let row = u16::try_from(cursor / width).unwrap_or(u16::MAX);
    let x = rect.x.saturating_add(1).saturating_add(col);
    let y = rect.y.checked_add(1)?.checked_add(row)?;
    (y < rect.y.saturating_add(rect.height.saturating_sub(1))).then_some((x, y))
}

/// Board application state for the terminal user interface.
pub struct App {
    board: Board,
    state: AppState,
    selected_column: usize,
    selected_card: usize,
    status_message: String,
    pending_delete: Option<TaskId>,
}

impl App {
    pub fn new(board: Board) -> Self {
        let mut app = Self {
            board,
            state: AppState::Board,
            selected_column: 0,
            selected_card: 0,
            status_message: String::new(),
            pending_delete: None,
        };
        app.clamp_selection();
        app
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    fn selected_status(&self) -> Status {
        Status::from_index(self.selected_column).unwrap_or(Status::Todo)
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.board
            .view()
            .card(self.selected_status(), self.selected_card)
            .map(|c| c.task_id().clone())
    }

    /// Keep the selected card inside the selected column.
    fn clamp_selection(&mut self) {
        let len = self.board.view().card_count(self.selected_status());
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Handle a key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state {
            AppState::Board => return self.handle_board_key(key),
            AppState::TaskForm => self.handle_form_key(key),
            AppState::ConfirmDelete => self.handle_confirm_key(key),
            AppState::Help => self.state = AppState::Board,
        }
        false
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        self.status_message.clear();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left if ctrl => self.move_selected(false),
            KeyCode::Right if ctrl => self.move_selected(true),
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < Status::ALL.len() - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.board.view().card_count(self.selected_status());
                if self.selected_card + 1 < len {
                    self.selected_card += 1;
                }
            }
            KeyCode::Enter => {
                if self.board.activate_card(self.selected_status(), self.selected_card) {
                    self.state = AppState::TaskForm;
                }
            }
            KeyCode::Char('a') => {
                self.board.open_add();
                self.state = AppState::TaskForm;
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    self.pending_delete = Some(id);
                    self.state = AppState::ConfirmDelete;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn move_selected(&mut self, right: bool) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let from = self.selected_status();
        let to = from.shifted(right);
        if to == from {
            return;
        }
        match self.board.move_task(&id, to) {
            Ok(()) => {
                self.selected_column = to.index();
                self.selected_card = self
                    .board
                    .view()
                    .column(to)
                    .and_then(|c| c.cards.iter().position(|card| card.task_id() == &id))
                    .unwrap_or(0);
                self.set_status_message(format!("Moved task to {}", to.label()));
            }
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.board.close_modal();
            self.state = AppState::Board;
            return;
        }
        if key.code == KeyCode::Enter {
            self.submit_form();
            return;
        }
        let Some(form) = self.board.modal_mut().form_mut() else {
            self.state = AppState::Board;
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Delete => form.handle_delete(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        match self.board.submit_modal() {
            Ok(task) => {
                self.state = AppState::Board;
                if let Some(status) = task.status.known() {
                    self.selected_column = status.index();
                    self.selected_card = self
                        .board
                        .view()
                        .column(status)
                        .and_then(|c| c.cards.iter().position(|card| card.task_id() == &task.id))
                        .unwrap_or(0);
                }
                self.clamp_selection();
                self.set_status_message("Task saved");
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let pending = self.pending_delete.take();
        self.state = AppState::Board;
        match (key.code, pending) {
            (KeyCode::Char('y') | KeyCode::Char('Y'), Some(id)) => match self.board.delete_task(&id) {
                Ok(task) => {
                    self.clamp_selection();
                    self.set_status_message(format!("Deleted '{}'", task.title));
                }
                Err(e) => self.set_status_message(format!("Error: {e}")),
            },
            _ => self.set_status_message("Delete cancelled"),
        }
    }

    /// Poll for one key event and handle it. Returns true if the app should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key));
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let total = self.board.tasks().len();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{total} tasks"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_board(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(area);

        for column in self.board.view().columns() {
            let Some(&chunk) = chunks.get(column.status.index()) else {
                continue;
            };
            let selected = column.status.index() == self.selected_column;
            let color = status_color(column.status);
            let border_style = if selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let items: Vec<ListItem> = column
                .cards
                .iter()
                .map(|card| ListItem::new(Line::from(card.title().to_string())))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(column.heading.as_str())
                        .border_style(border_style),
                )
                .highlight_style(Style::default().fg(Color::Black).bg(color))
                .highlight_symbol("> ");

            let mut state = ListState::default();
            if selected && !column.cards.is_empty() {
                state.select(Some(self.selected_card));
            }
            f.render_stateful_widget(list, chunk, &mut state);
        }
    }

    fn input_widget<'a>(field: &'a InputField, title: &'a str, active: bool) -> Paragraph<'a> {
        let style = if active { Style::default().fg(GOLD) } else { Style::default() };
        Paragraph::new(field.value.as_str())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title).border_style(style))
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect, form: &TaskForm) {
        let popup = centered_rect(60, 60, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(form.modal_title.as_str())
            .border_style(Style::default().fg(status_color(form.selected_status())));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(3),    // Description
                Constraint::Length(3), // Status
                Constraint::Length(1), // Instructions
            ])
            .split(inner);

        f.render_widget(
            Self::input_widget(&form.title, "Title *", form.current_field == TITLE_FIELD),
            chunks[0],
        );
        f.render_widget(
            Self::input_widget(&form.description, "Description", form.current_field == DESCRIPTION_FIELD),
            chunks[1],
        );

        let status_style = if form.current_field == STATUS_FIELD {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let status = Paragraph::new(format!("< {} >", form.selected_status().label())).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Status")
                .border_style(status_style),
        );
        f.render_widget(status, chunks[2]);

        let hint = Paragraph::new("Tab: next field | Enter: save | Esc: cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[3]);

        let cursor_area = match form.current_field {
            TITLE_FIELD => Some((chunks[0], &form.title)),
            DESCRIPTION_FIELD => Some((chunks[1], &form.description)),
            _ => None,
        };
        if let Some((x, y)) = cursor_area.and_then(|(rect, field)| cursor_position(rect, field.cursor)) {
            f.set_cursor_position((x, y));
        }
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let title = self
            .pending_delete
            .as_ref()
            .and_then(|id| self.board.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let popup = centered_rect(50, 20, area);
        f.render_widget(Clear, popup);
        let text = vec![
            Line::from(format!("Delete '{title}'?")),
            Line::from(""),
            Line::from("y: delete   any other key: cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, popup);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 70, area);
        f.render_widget(Clear, popup);
        let lines: Vec<Line> = HELP_LINES
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(format!("{keys:<24}"), Style::default().fg(GOLD)),
                    Span::raw(*action),
                ])
            })
            .collect();
        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help (any key to close)"),
        );
        f.render_widget(help, popup);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Board => "a: add | Enter: edit | d: delete | Ctrl+←/→: move | h: help | q: quit".to_string(),
                AppState::TaskForm => self
                    .board
                    .modal()
                    .form()
                    .map(|f| f.modal_title.clone())
                    .unwrap_or_default(),
                AppState::ConfirmDelete => "Confirm delete".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let color = status_color(self.selected_status());
        let status = Paragraph::new(text)
            .style(Style::default().bg(color).fg(Color::Rgb(20, 20, 20)))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen.
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        match self.state {
            AppState::Board => {}
            AppState::TaskForm => {
                if let Some(form) = self.board.modal().form() {
                    self.render_task_form(f, chunks[1], form);
                }
            }
            AppState::ConfirmDelete => self.render_confirm(f, chunks[1]),
            AppState::Help => self.render_help(f, chunks[1]),
        }
    }

    /// Main event loop: draw, then handle input, until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_tasks;
    use crate::storage::MemoryStorage;
    use crate::store::TaskStore;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(Board::open(TaskStore::new(
            Box::new(MemoryStorage::new()),
            initial_tasks(),
        )))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cursor_position_wraps_and_clips() {
        let rect = Rect::new(10, 5, 12, 4);
        assert_eq!(cursor_position(rect, 0), Some((11, 6)));
        assert_eq!(cursor_position(rect, 11), Some((12, 7)));
        assert_eq!(cursor_position(rect, 20), None);
        assert_eq!(cursor_position(rect, 70_000), None);
    }

    #[test]
    fn test_board_shows_column_headings() {
        let text = screen(&app());
        assert!(text.contains("TODO (3)"));
        assert!(text.contains("DOING (2)"));
        assert!(text.contains("DONE (1)"));
        assert!(text.contains("Add keyboard shortcuts"));
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state(), AppState::TaskForm);
        assert!(screen(&app).contains("Add New Task"));

        type_text(&mut app, "Ship it");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state(), AppState::Board);
        let last = app.board().tasks().last().unwrap();
        assert_eq!(last.title, "Ship it");
        assert_eq!(last.status.known(), Some(Status::Doing));
        assert_eq!(app.selected_status(), Status::Doing);
        assert_eq!(app.selected_task_id(), Some(last.id.clone()));
    }

    #[test]
    fn test_empty_title_keeps_form_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::TaskForm);
        assert_eq!(app.status_message, "Title is required");
    }

    #[test]
    fn test_edit_selected_card() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::TaskForm);
        assert!(screen(&app).contains("Edit Task"));

        type_text(&mut app, "!");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.board().get(&TaskId::from("2")).unwrap().title, "Write the README!");
    }

    #[test]
    fn test_escape_closes_form_without_saving() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "xyz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), AppState::Board);
        assert!(!app.board().modal().is_open());
        assert_eq!(app.board().get(&TaskId::from("4")).unwrap().title, "Add keyboard shortcuts");
    }

    #[test]
    fn test_move_card_with_ctrl_arrow() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL));
        assert_eq!(app.selected_status(), Status::Doing);
        assert_eq!(app.board().view().card_count(Status::Doing), 3);
        assert_eq!(app.selected_task_id(), Some(TaskId::from("4")));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state(), AppState::ConfirmDelete);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board().tasks().len(), 6);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.board().tasks().len(), 5);
        assert!(app.board().get(&TaskId::from("4")).is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state(), AppState::Help);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state(), AppState::Board);
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
