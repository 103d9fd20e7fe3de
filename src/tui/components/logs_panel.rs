//! Activity panel
//!
//! Shows the tail of the captured tracing output, newest at the bottom.

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, &app.theme))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(" Activity "),
    );

    f.render_widget(list, area);
}

/// "[06:30:05] WARN  screens::pilgrim: SOS raised"
fn format_log_entry(entry: &LogEntry) -> String {
    let target = entry
        .target
        .strip_prefix(concat!(env!("CARGO_PKG_NAME"), "::"))
        .unwrap_or(&entry.target);
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        target,
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.danger)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn entry_format_has_time_level_target_message() {
        let entry = LogEntry {
            timestamp: Utc.with_ymd_and_hms(2028, 4, 9, 6, 30, 5).unwrap(),
            level: LogLevel::Warn,
            target: "safeyatra::screens::pilgrim".to_string(),
            message: "SOS raised".to_string(),
        };
        assert_eq!(
            format_log_entry(&entry),
            "[06:30:05] WARN  screens::pilgrim: SOS raised"
        );
    }

    #[test]
    fn foreign_targets_are_shown_in_full() {
        let entry = LogEntry {
            timestamp: Utc.with_ymd_and_hms(2028, 4, 9, 6, 30, 5).unwrap(),
            level: LogLevel::Debug,
            target: "tokio::net".to_string(),
            message: "connect".to_string(),
        };
        assert_eq!(format_log_entry(&entry), "[06:30:05] DEBUG tokio::net: connect");
    }
}
