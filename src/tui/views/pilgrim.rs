// Pilgrim app view
//
// Header with connectivity badge, the SOS button, location status,
// quick actions, heatmap placeholder and safety tips.

use crate::screens::pilgrim::{CrowdLevel, PilgrimScreen, HEATMAP_LEGEND, SAFETY_TIPS};
use crate::theme::Theme;
use crate::tui::app::App;
use crate::tui::layout::{cards, Breakpoint};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(screen) = &app.pilgrim else {
        return;
    };

    let wide = Breakpoint::from_width(area.width).at_least(Breakpoint::Wide);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(6),
        ])
        .split(area);

    render_header(f, rows[0], app, screen);
    render_sos(f, rows[1], app, screen);

    if wide {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        render_status_and_actions(f, columns[0], app, screen);
        render_heatmap_and_tips(f, columns[1], &app.theme);
    } else {
        render_status_and_actions(f, rows[2], app, screen);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App, screen: &PilgrimScreen) {
    let (badge, badge_color) = if screen.online() {
        ("● Online", app.theme.ok)
    } else {
        ("● Offline", app.theme.danger)
    };
    let line = Line::from(vec![
        Span::styled(
            " SafeYatra ",
            Style::default()
                .fg(app.theme.pilgrim)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Simhastha 2028  ", Style::default().fg(app.theme.muted)),
        Span::styled(badge, Style::default().fg(badge_color)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_sos(f: &mut Frame, area: Rect, app: &App, screen: &PilgrimScreen) {
    let (label, style) = if screen.sos_active() {
        (
            format!("{} SOS ACTIVE - HELP COMING!", app.spinner_char()),
            Style::default()
                .fg(Color::White)
                .bg(app.theme.danger)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )
    } else {
        (
            "🚨 EMERGENCY SOS  [s]".to_string(),
            Style::default()
                .fg(Color::White)
                .bg(app.theme.danger)
                .add_modifier(Modifier::BOLD),
        )
    };

    let text = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(format!("   {}   ", label), style)),
        Line::from(Span::styled(
            "Press for immediate emergency assistance",
            Style::default().fg(app.theme.muted),
        )),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.danger));
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}

fn crowd_color(level: CrowdLevel, theme: &Theme) -> Color {
    match level {
        CrowdLevel::Low => theme.ok,
        CrowdLevel::Medium => theme.warn,
        CrowdLevel::High => theme.danger,
    }
}

fn render_status_and_actions(f: &mut Frame, area: Rect, app: &App, screen: &PilgrimScreen) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    let location = match screen.location() {
        Some(coordinates) => format!(
            "Lat: {:.6}, Lng: {:.6}",
            coordinates.lat, coordinates.lng
        ),
        None => format!("{} Locating...", app.spinner_char()),
    };
    let level = screen.crowd_level();
    let status = Text::from(vec![
        Line::from(vec![
            Span::styled("Crowd Level: ", Style::default().fg(app.theme.foreground)),
            Span::styled(
                level.label(),
                Style::default()
                    .fg(crowd_color(level, &app.theme))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("📍 {}", location),
            Style::default().fg(app.theme.muted),
        )),
    ]);
    f.render_widget(
        Paragraph::new(status).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border))
                .title(" Current Location Status "),
        ),
        rows[0],
    );

    let actions = [
        ("🔍 Lost & Found", "Report missing person", "f", app.theme.info),
        ("🧭 Safe Route", "Navigate safely", "r", app.theme.ok),
    ];
    let slots = cards(rows[1], actions.len() as u32, Breakpoint::Compact);
    for ((title, caption, key, color), slot) in actions.iter().zip(slots.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(
                *title,
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*caption, Style::default().fg(app.theme.muted))),
            Line::from(Span::styled(
                format!("[{}]", key),
                Style::default().fg(app.theme.muted),
            )),
        ]);
        f.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type)
                    .border_style(Style::default().fg(*color)),
            ),
            *slot,
        );
    }
}

fn render_heatmap_and_tips(f: &mut Frame, area: Rect, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);

    let mut legend: Vec<Span> = Vec::new();
    for (level, caption) in HEATMAP_LEGEND {
        legend.push(Span::styled("■ ", Style::default().fg(crowd_color(level, theme))));
        legend.push(Span::styled(
            format!("{}  ", caption),
            Style::default().fg(theme.foreground),
        ));
    }
    let heatmap = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "🗺️ Interactive map will load here",
            Style::default().fg(theme.muted),
        )),
        Line::raw(""),
        Line::from(legend),
    ]);
    f.render_widget(
        Paragraph::new(heatmap).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(" Crowd Heatmap "),
        ),
        rows[0],
    );

    let tips: Vec<Line> = SAFETY_TIPS
        .iter()
        .map(|tip| Line::from(Span::styled(format!("• {}", tip), Style::default().fg(theme.foreground))))
        .collect();
    f.render_widget(
        Paragraph::new(tips).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.warn))
                .title(" ⚠️ Safety Reminder "),
        ),
        rows[1],
    );
}
