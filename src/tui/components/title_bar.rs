// Title bar component
//
// Renders the app title, the current screen and who is logged in.

use crate::tui::app::{App, ScreenKind};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
///
/// Shows:
/// - App name
/// - Pending indicator (spinner) while a login request is in flight
/// - Session summary once logged in (wide terminals only)
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let (screen, accent) = match app.screen_kind() {
        ScreenKind::ModeSelect => ("Select Access", app.theme.title),
        ScreenKind::Login => match app.login.as_ref().map(|flow| flow.user_type()) {
            Some(user_type) => (user_type.label(), app.theme.title),
            None => ("Login", app.theme.title),
        },
        ScreenKind::Pilgrim => ("Pilgrim App", app.theme.pilgrim),
        ScreenKind::Command => ("Command Center", app.theme.command),
    };

    let pending = app
        .login
        .as_ref()
        .filter(|flow| flow.phase().is_pending())
        .map(|_| format!(" {}", app.spinner_char()))
        .unwrap_or_default();

    let mut title_text = format!(" 🛕 SafeYatra ──── {}{}", screen, pending);
    if let Some(session) = app.session() {
        if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
            title_text.push_str(&format!(" ──── {}", session.summary()));
        }
    }

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(accent))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
