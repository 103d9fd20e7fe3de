// Views module - screen-level rendering logic
//
// One view per routed screen:
// - Mode select: choose pilgrim or command access
// - Login: contact, role and one-time code form
// - Pilgrim: SOS, location status and quick actions
// - Command: tabbed emergency response dashboard
//
// This module builds the shell and dispatches on the router's screen.

mod command;
mod login;
mod modal;
mod mode_select;
mod pilgrim;

use super::app::{App, ScreenKind};
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the activity panel when shown
const ACTIVITY_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(10)];
    if app.show_activity {
        constraints.push(Constraint::Length(ACTIVITY_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);

    let content = chunks[1];
    match app.screen_kind() {
        ScreenKind::ModeSelect => mode_select::render(f, content, app),
        ScreenKind::Login => login::render(f, content, app),
        ScreenKind::Pilgrim => pilgrim::render(f, content, app),
        ScreenKind::Command => command::render(f, content, app),
    }

    if app.show_activity {
        components::render_logs_panel(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    // Modal overlay (on top of everything)
    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    // Toast on top of modal too
    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
