// Mode selection view
//
// Landing screen: product header, the two access cards and headline stats.

use crate::session::UserType;
use crate::tui::app::App;
use crate::tui::layout::{cards, Breakpoint};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FEATURES: [&str; 3] = [
    "🚁 AeroRover-X Integration",
    "🗺️ Real-time Heatmaps",
    "🚨 Emergency Response",
];

const STATS: [(&str, &str); 3] = [
    ("70%", "Stampede Risk Reduction"),
    ("<5min", "Emergency Response"),
    ("<2min", "Lost Person Tracing"),
];

const COMPLIANCE: &str =
    "✅ DPDP Act 2023 Compliant • ✅ DGCA Drone Regulations • ✅ Privacy Protected";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let show_stats = Breakpoint::from_width(area.width).at_least(Breakpoint::Normal);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(if show_stats { 4 } else { 0 }),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, chunks[0], app);
    render_cards(f, chunks[1], app);
    if show_stats {
        render_stats(f, chunks[2], app);
    }

    let compliance = Paragraph::new(COMPLIANCE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted));
    f.render_widget(compliance, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            "SafeYatra",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "AI-Powered Safety System for Simhastha 2028",
            Style::default().fg(app.theme.foreground),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            FEATURES.join("   "),
            Style::default().fg(app.theme.muted),
        )),
    ]);
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Select Your Access ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let slots = cards(inner, UserType::ALL.len() as u32, Breakpoint::Normal);
    for (i, (user_type, slot)) in UserType::ALL.iter().zip(slots.iter()).enumerate() {
        render_card(f, *slot, app, *user_type, i == app.mode_cursor);
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &App, user_type: UserType, focused: bool) {
    let (icon, description, action, accent) = match user_type {
        UserType::Pilgrim => (
            "📱",
            "Mobile safety companion with SOS, navigation, and lost & found features",
            "Continue as Pilgrim",
            app.theme.pilgrim,
        ),
        UserType::Command => (
            "🛡️",
            "Emergency response dashboard for police, medical teams, and coordinators",
            "Access Dashboard",
            app.theme.command,
        ),
    };
    let shortcut = match user_type {
        UserType::Pilgrim => "1",
        UserType::Command => "2",
    };

    let button_style = if focused {
        Style::default()
            .fg(Color::White)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };

    let text = Text::from(vec![
        Line::from(Span::styled(
            format!("{} {}", icon, user_type.label()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            description,
            Style::default().fg(app.theme.foreground),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!(" {} → ", action), button_style),
            Span::styled(format!("  [{}]", shortcut), Style::default().fg(app.theme.muted)),
        ]),
    ]);

    let border = if focused { accent } else { app.theme.border };
    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(card, area);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let slots = cards(area, STATS.len() as u32, Breakpoint::Compact);
    for ((value, caption), slot) in STATS.iter().zip(slots.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(
                *value,
                Style::default()
                    .fg(app.theme.title)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*caption, Style::default().fg(app.theme.muted))),
        ]);
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::TOP).border_style(
                    Style::default().fg(app.theme.border),
                )),
            *slot,
        );
    }
}
