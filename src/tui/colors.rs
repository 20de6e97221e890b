//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

/// Used for the todo column
pub const SLATE_BLUE: Color = Color::Rgb(90, 110, 190);
/// Used for the doing column and the active form field
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for the done column
pub const DARK_GREEN: Color = Color::Rgb(0, 120, 0);

/// Accent colour of a column.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => SLATE_BLUE,
        Status::Doing => GOLD,
        Status::Done => DARK_GREEN,
    }
}
