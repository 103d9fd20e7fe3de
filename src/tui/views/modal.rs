// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help modal: keyboard shortcuts for every screen and current config
// - Session modal: the active session as JSON

use crate::tui::app::App;
use crate::tui::clipboard::session_json;
use crate::tui::layout::centered_rect;
use crate::tui::modal::Modal;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Session => render_session(f, app),
    }
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Access", header_style)),
        kb("←/→, Tab", "Choose pilgrim or command"),
        kb("1 / 2", "Select directly"),
        kb("Enter", "Continue"),
        Line::raw(""),
        Line::from(Span::styled("  Login", header_style)),
        kb("↑/↓, Tab", "Move between fields"),
        kb("←/→", "Language / role / email-phone"),
        kb("Enter", "Send code, then verify"),
        Line::raw(""),
        Line::from(Span::styled("  Pilgrim App", header_style)),
        kb("s", "Emergency SOS"),
        kb("f", "Lost & Found"),
        kb("r", "Safe Route"),
        Line::raw(""),
        Line::from(Span::styled("  Command Center", header_style)),
        kb("Tab, 1-5", "Switch dashboard tab"),
        kb("↑/↓, j/k", "Select alert / drone"),
        kb("Enter", "Resolve / dispatch"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("i", "Session details"),
        kb("y", "Copy session JSON"),
        kb("a, F2", "Toggle activity log"),
        kb("x", "Log out"),
        kb("?, F1", "Toggle this help"),
        kb("q, Ctrl+C", "Quit"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(&app.theme.name, key_style),
            Span::styled("  |  Language: ", desc_style),
            Span::styled(app.config().language.native_name(), key_style),
        ]),
    ]);

    let area = centered_rect(46, 36, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the session modal overlay
fn render_session(f: &mut Frame, app: &App) {
    let body = match app.session().map(session_json) {
        Some(Ok(json)) => json,
        Some(Err(e)) => format!("Failed to serialize session: {:#}", e),
        None => "Not logged in".to_string(),
    };

    let height = body.lines().count() as u16 + 4;
    let area = centered_rect(64, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .bg(app.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Session ")
                .title_bottom(Line::from(" y copy │ Esc close ").centered()),
        );

    f.render_widget(paragraph, area);
}
