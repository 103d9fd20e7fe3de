// Login view
//
// Language picker, role picker (command only), contact field with
// email/phone tabs and, once a code is sent, the code field. The focused
// row is highlighted; the action line reflects what Enter will do.

use crate::i18n::{login_strings, LoginStrings};
use crate::login::{ContactTab, LoginFlow, LoginPhase, CODE_LENGTH};
use crate::session::{Role, UserType};
use crate::tui::app::{App, LoginField};
use crate::tui::layout::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = &app.login else {
        return;
    };
    let form = flow.form();
    let strings = login_strings(form.language, flow.user_type());
    let accent = match flow.user_type() {
        UserType::Pilgrim => app.theme.pilgrim,
        UserType::Command => app.theme.command,
    };

    let label_style = Style::default().fg(app.theme.muted);
    let value_style = Style::default().fg(app.theme.foreground);
    let row = |field: LoginField, label: &str, value: Vec<Span<'static>>| -> Vec<Line<'static>> {
        let focused = app.login_focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let label_line = Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(accent)),
            Span::styled(label.to_string(), label_style),
        ]);
        let mut value_spans = vec![Span::raw("    ")];
        value_spans.extend(value);
        let mut value_line = Line::from(value_spans);
        if focused {
            value_line = value_line.style(Style::default().add_modifier(Modifier::BOLD));
        }
        vec![label_line, value_line, Line::raw("")]
    };

    let mut lines = vec![
        Line::from(Span::styled(
            strings.title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(strings.subtitle, value_style)).alignment(Alignment::Center),
        Line::raw(""),
    ];

    lines.extend(row(
        LoginField::Language,
        strings.language,
        vec![Span::styled(
            format!("‹ {} ›", form.language.native_name()),
            value_style,
        )],
    ));

    if flow.user_type() == UserType::Command {
        let roles: Vec<Span<'static>> = Role::COMMAND
            .iter()
            .map(|role| {
                let style = if form.role == Some(*role) {
                    Style::default()
                        .fg(Color::White)
                        .bg(accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    value_style
                };
                Span::styled(format!(" {} ", role.label()), style)
            })
            .collect();
        lines.extend(row(LoginField::Role, strings.role, roles));
    }

    lines.extend(row(
        LoginField::Contact,
        contact_label(&strings, form.tab),
        contact_value(flow, app.login_focus == LoginField::Contact, value_style, label_style),
    ));

    if matches!(flow.phase(), LoginPhase::CodeSent | LoginPhase::Verifying) {
        lines.extend(row(
            LoginField::Code,
            strings.code,
            vec![Span::styled(
                code_boxes(&form.code, app.login_focus == LoginField::Code),
                value_style,
            )],
        ));
    }

    lines.push(action_line(app, flow, &strings, accent).alignment(Alignment::Center));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(60, height, area);
    let card = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(accent)),
    );
    f.render_widget(card, area);
}

fn contact_label(strings: &LoginStrings, tab: ContactTab) -> &'static str {
    match tab {
        ContactTab::Email => strings.email,
        ContactTab::Phone => strings.phone,
    }
}

fn contact_value(
    flow: &LoginFlow,
    focused: bool,
    value_style: Style,
    muted: Style,
) -> Vec<Span<'static>> {
    let form = flow.form();
    let (value, placeholder) = match form.tab {
        ContactTab::Email => (form.email.clone(), "your.email@example.com"),
        ContactTab::Phone => (form.phone.clone(), "+91 98765 43210"),
    };
    let tabs = format!(
        "[{}|{}] ",
        mark(form.tab == ContactTab::Email, ContactTab::Email.label()),
        mark(form.tab == ContactTab::Phone, ContactTab::Phone.label()),
    );

    let mut spans = vec![Span::styled(tabs, muted)];
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder, muted));
    } else {
        spans.push(Span::styled(value, value_style));
    }
    if focused && flow.contact_editable() {
        spans.push(Span::styled("▏", value_style));
    }
    spans
}

fn mark(active: bool, label: &str) -> String {
    if active {
        format!("•{}", label)
    } else {
        label.to_string()
    }
}

/// Code slots: typed characters then underscores up to the code length
fn code_boxes(code: &str, focused: bool) -> String {
    let typed = code.chars().count();
    let mut out: Vec<String> = code.chars().map(|c| c.to_string()).collect();
    out.extend((typed..CODE_LENGTH).map(|_| "_".to_string()));
    let boxes = out.join(" ");
    if focused && typed < CODE_LENGTH {
        format!("{} ▏", boxes)
    } else {
        boxes
    }
}

fn action_line(
    app: &App,
    flow: &LoginFlow,
    strings: &LoginStrings,
    accent: Color,
) -> Line<'static> {
    let enabled = Style::default()
        .fg(Color::White)
        .bg(accent)
        .add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(app.theme.muted);

    let (label, ready) = match flow.phase() {
        LoginPhase::Idle => (strings.send_code.to_string(), flow.check_request().is_ok()),
        LoginPhase::Requesting => (format!("{} {}", app.spinner_char(), strings.sending), false),
        LoginPhase::CodeSent => (strings.verify.to_string(), flow.check_verify().is_ok()),
        LoginPhase::Verifying => (
            format!("{} {}", app.spinner_char(), strings.verifying),
            false,
        ),
    };
    let style = if ready { enabled } else { disabled };
    Line::from(Span::styled(format!("  {}  ", label), style))
}
