// Command center view
//
// Metrics strip on top, tab bar, then the selected dashboard tab.
// Alerts and drones tabs highlight the selected row; Enter acts on it.

use crate::screens::command::{
    AlertStatus, CommandScreen, DashboardTab, DroneStatus, SearchStatus, Severity, RESPONSE_TIME,
};
use crate::theme::Theme;
use crate::tui::app::App;
use crate::tui::components::{battery_bar, format_ago, format_number};
use crate::tui::layout::{cards, Breakpoint};
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(screen) = &app.command else {
        return;
    };

    let metrics_height = if Breakpoint::from_width(area.width).at_least(Breakpoint::Normal) {
        4
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(metrics_height),
            Constraint::Length(2),
            Constraint::Min(6),
        ])
        .split(area);

    render_header(f, rows[0], app);
    if metrics_height > 0 {
        render_metrics(f, rows[1], &app.theme, screen);
    }
    render_tabs(f, rows[2], &app.theme, screen.tab);

    let body = rows[3];
    match screen.tab {
        DashboardTab::Overview => render_overview(f, body, &app.theme, screen),
        DashboardTab::Alerts => render_alerts(f, body, &app.theme, screen),
        DashboardTab::Heatmap => render_heatmap(f, body, &app.theme, screen),
        DashboardTab::Drones => render_drones(f, body, &app.theme, screen),
        DashboardTab::LostFound => render_lost_found(f, body, &app.theme, screen),
    }
}

fn panel<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(title)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let role = app
        .session()
        .map(|session| session.role().label().to_uppercase())
        .unwrap_or_default();
    let mut spans = vec![
        Span::styled(
            " SafeYatra Command Center ",
            Style::default()
                .fg(app.theme.command)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Simhastha 2028 - Emergency Response Dashboard  ",
            Style::default().fg(app.theme.muted),
        ),
    ];
    if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
        spans.push(Span::styled(
            format!("{}  ", role),
            Style::default().fg(app.theme.foreground),
        ));
    }
    spans.push(Span::styled("● System Active", Style::default().fg(app.theme.ok)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_metrics(f: &mut Frame, area: Rect, theme: &Theme, screen: &CommandScreen) {
    let metrics = [
        (
            "👥 Total Pilgrims",
            format_number(screen.crowd().total_people),
            theme.info,
        ),
        (
            "⚠️ Active Alerts",
            screen.active_alert_count().to_string(),
            theme.danger,
        ),
        (
            "🚁 Drones Active",
            screen.active_drone_count().to_string(),
            theme.ok,
        ),
        ("⏱ Response Time", RESPONSE_TIME.to_string(), theme.command),
    ];

    let slots = cards(area, metrics.len() as u32, Breakpoint::Compact);
    for ((label, value, color), slot) in metrics.iter().zip(slots.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(*label, Style::default().fg(theme.muted))),
            Line::from(Span::styled(
                value.as_str(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
        ]);
        f.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(*color)),
            ),
            *slot,
        );
    }
}

fn render_tabs(f: &mut Frame, area: Rect, theme: &Theme, selected: DashboardTab) {
    let titles: Vec<String> = DashboardTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(selected.index())
        .style(Style::default().fg(theme.muted))
        .highlight_style(
            Style::default()
                .fg(theme.command)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│")
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(theme.border)));
    f.render_widget(tabs, area);
}

fn severity_color(severity: Severity, theme: &Theme) -> Color {
    match severity {
        Severity::High => theme.danger,
        Severity::Medium => theme.warn,
    }
}

fn selected_style(theme: &Theme) -> Style {
    Style::default()
        .fg(Color::White)
        .bg(theme.command)
        .add_modifier(Modifier::BOLD)
}

fn render_overview(f: &mut Frame, area: Rect, theme: &Theme, screen: &CommandScreen) {
    let slots = cards(area, 2, Breakpoint::Wide);

    let crowd = screen.crowd();
    let heatmap = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "🗺️ Live crowd density map",
            Style::default().fg(theme.foreground),
        )),
        Line::from(Span::styled(
            "Updates every 5 seconds",
            Style::default().fg(theme.muted),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                format!("■ {} high  ", crowd.high_density_areas),
                Style::default().fg(theme.danger),
            ),
            Span::styled(
                format!("■ {} medium  ", crowd.medium_density_areas),
                Style::default().fg(theme.warn),
            ),
            Span::styled(
                format!("■ {} low", crowd.low_density_areas),
                Style::default().fg(theme.ok),
            ),
        ]),
    ]);
    f.render_widget(
        Paragraph::new(heatmap)
            .alignment(Alignment::Center)
            .block(panel(theme, " Real-Time Heatmap ")),
        slots[0],
    );

    let messages: Vec<ListItem> = screen
        .messages()
        .iter()
        .map(|m| {
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", m.unit),
                        Style::default().fg(theme.command).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(m.text, Style::default().fg(theme.foreground)),
                ]),
                Line::from(Span::styled(
                    format!("  {} min ago", m.minutes_ago),
                    Style::default().fg(theme.muted),
                )),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(messages).block(panel(theme, " Team Communication ")),
        slots[1],
    );
}

fn render_alerts(f: &mut Frame, area: Rect, theme: &Theme, screen: &CommandScreen) {
    let now = Utc::now();
    let items: Vec<ListItem> = screen
        .alerts()
        .iter()
        .enumerate()
        .map(|(i, alert)| {
            let marker = if i == screen.selected() { "▶" } else { " " };
            let action = if alert.status == AlertStatus::Active {
                "  [Enter] Resolve"
            } else {
                ""
            };
            let headline = Line::from(vec![
                Span::raw(format!("{} ", marker)),
                Span::styled(
                    format!("{} at {}", alert.kind.label(), alert.location),
                    Style::default()
                        .fg(severity_color(alert.severity, theme))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" [{}]", alert.severity.as_str()),
                    Style::default().fg(theme.muted),
                ),
            ]);
            let detail = Line::from(vec![
                Span::styled(
                    format!(
                        "  {} - Status: {}",
                        format_ago(alert.raised_at, now),
                        alert.status.as_str()
                    ),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(action, Style::default().fg(theme.ok)),
            ]);
            let item = ListItem::new(Text::from(vec![headline, detail, Line::raw("")]));
            if i == screen.selected() {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    f.render_widget(
        List::new(items).block(panel(theme, " Live Alerts ")),
        area,
    );
}

fn render_heatmap(f: &mut Frame, area: Rect, theme: &Theme, screen: &CommandScreen) {
    let crowd = screen.crowd();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(area);

    let map = Paragraph::new(Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "🗺️ Live Crowd Density Analysis",
            Style::default().fg(theme.foreground),
        )),
        Line::from(Span::styled(
            format!("{} pilgrims tracked", format_number(crowd.total_people)),
            Style::default().fg(theme.muted),
        )),
    ]))
    .alignment(Alignment::Center)
    .block(panel(theme, " Crowd Heatmap "));
    f.render_widget(map, rows[0]);

    let densities = [
        (crowd.high_density_areas, "High Density Areas", theme.danger),
        (crowd.medium_density_areas, "Medium Density Areas", theme.warn),
        (crowd.low_density_areas, "Low Density Areas", theme.ok),
    ];
    let slots = cards(rows[1], densities.len() as u32, Breakpoint::Compact);
    for ((count, label, color), slot) in densities.iter().zip(slots.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(
                count.to_string(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*label, Style::default().fg(theme.muted))),
        ]);
        f.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(*color)),
            ),
            *slot,
        );
    }
}

fn render_drones(f: &mut Frame, area: Rect, theme: &Theme, screen: &CommandScreen) {
    let items: Vec<ListItem> = screen
        .drones()
        .iter()
        .enumerate()
        .map(|(i, drone)| {
            let status_color = match drone.status {
                DroneStatus::Active => theme.ok,
                DroneStatus::Returning => theme.warn,
                DroneStatus::Standby => theme.muted,
            };
            let battery_color = if drone.battery < 40 { theme.danger } else { theme.ok };
            let header_style = if i == screen.selected() {
                selected_style(theme)
            } else {
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD)
            };
            let action = if drone.status == DroneStatus::Active {
                ""
            } else {
                "  [Enter] Dispatch"
            };
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(format!(" 🚁 {} ", drone.id), header_style),
                    Span::styled(
                        format!(" {}", drone.status.as_str()),
                        Style::default().fg(status_color),
                    ),
                    Span::styled(action, Style::default().fg(theme.ok)),
                ]),
                Line::from(vec![
                    Span::styled("    Location: ", Style::default().fg(theme.muted)),
                    Span::styled(drone.location, Style::default().fg(theme.foreground)),
                ]),
                Line::from(vec![
                    Span::styled("    Battery:  ", Style::default().fg(theme.muted)),
                    Span::styled(battery_bar(drone.battery), Style::default().fg(battery_color)),
                ]),
                Line::raw(""),
            ]))
        })
        .collect();

    f.render_widget(
        List::new(items).block(panel(theme, " AeroRover-X Fleet ")),
        area,
    );
}

fn render_lost_found(f: &mut Frame, area: Rect, theme: &Theme, screen: &CommandScreen) {
    let lines: Vec<Line> = screen
        .lost_persons()
        .iter()
        .enumerate()
        .flat_map(|(i, person)| {
            let status_color = match person.status {
                SearchStatus::Searching => theme.warn,
                SearchStatus::Found => theme.ok,
            };
            let marker = if i == screen.selected() { "▶" } else { " " };
            vec![
                Line::from(vec![
                    Span::raw(format!("{} ", marker)),
                    Span::styled(
                        format!("{}, Age: {}", person.name, person.age),
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  [{}]", person.status.as_str()),
                        Style::default().fg(status_color),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  Last seen: {}", person.last_seen),
                    Style::default().fg(theme.muted),
                )),
                Line::from(Span::styled(
                    format!("  AI Confidence: {}%", person.confidence),
                    Style::default().fg(theme.info),
                )),
                Line::raw(""),
            ]
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(theme, " Lost Person Database ")),
        area,
    );
}
