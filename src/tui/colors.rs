//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::TaskStatus;

/// Used for In Progress
pub const DASHBOARD_BLUE: Color = Color::Rgb(59, 130, 246);
/// Used for Need For Test
pub const DASHBOARD_PURPLE: Color = Color::Rgb(139, 92, 246);
/// Used for Completed
pub const DASHBOARD_GREEN: Color = Color::Rgb(16, 185, 129);
/// Used for Re-open
pub const DASHBOARD_RED: Color = Color::Rgb(239, 68, 68);

// Native Color::Gray is used for Need To Do

/// Accent color of a board column.
pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::NeedToDo => Color::Gray,
        TaskStatus::InProgress => DASHBOARD_BLUE,
        TaskStatus::NeedForTest => DASHBOARD_PURPLE,
        TaskStatus::Completed => DASHBOARD_GREEN,
        TaskStatus::ReOpen => DASHBOARD_RED,
    }
}
