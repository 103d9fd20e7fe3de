// Components module - reusable UI building blocks
//
// Shell components are rendered on every screen:
// - Title bar: app name, current screen, session summary
// - Status bar: key hints, uptime, log count
// - Logs panel: captured tracing output ("Activity")
//
// Toasts float above everything else.

pub mod formatters;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the activity panel (convenience wrapper)
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    logs_panel::render(f, area, app);
}

// Re-export formatters for shared use
pub use formatters::{battery_bar, format_ago, format_number};
