//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a configurable duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::screens::Notice;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Visual weight of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Alert,
}

/// A toast notification that auto-dismisses
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub detail: Option<String>,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(title: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            detail: None,
            kind: ToastKind::Info,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn from_notice(notice: Notice, duration: Duration) -> Self {
        Self {
            detail: notice.detail,
            ..Self::new(notice.title, duration)
        }
    }

    pub fn alert(mut self) -> Self {
        self.kind = ToastKind::Alert;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` so the toast appears on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let text_width = self
            .detail
            .as_deref()
            .map(UnicodeWidthStr::width)
            .unwrap_or(0)
            .max(self.title.width());
        // 2 cells of padding each side, plus borders
        let width = (text_width as u16 + 6).min(area.width.saturating_sub(4));
        let height = if self.detail.is_some() { 4 } else { 3 };

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let accent = match self.kind {
            ToastKind::Info => theme.highlight,
            ToastKind::Alert => theme.danger,
        };

        let mut lines = vec![Line::styled(
            self.title.as_str(),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(detail) = &self.detail {
            lines.push(Line::styled(detail.as_str(), Style::default().fg(theme.muted)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_detail_carries_over() {
        let toast = Toast::from_notice(
            Notice::new("Saved").with_detail("Location: 1.0000, 2.0000"),
            Duration::from_secs(3),
        );
        assert_eq!(toast.detail.as_deref(), Some("Location: 1.0000, 2.0000"));
        assert_eq!(toast.kind, ToastKind::Info);
        assert!(!toast.is_expired());
    }

    #[test]
    fn zero_duration_expires_immediately() {
        assert!(Toast::new("gone", Duration::ZERO).is_expired());
    }
}
