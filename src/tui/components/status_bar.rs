// Status bar component
//
// Renders key hints for the current screen plus uptime and log count.

use crate::tui::app::{App, LoginField, ScreenKind};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Key hints for the current screen
pub fn hints(app: &App) -> &'static str {
    match app.screen_kind() {
        ScreenKind::ModeSelect => "←/→ choose │ Enter select │ 1 pilgrim │ 2 command │ q quit",
        ScreenKind::Login => match app.login_focus {
            LoginField::Language => "↑/↓ field │ ←/→ language │ Enter send code │ q quit",
            LoginField::Role => "↑/↓ field │ ←/→ role │ Enter send code │ q quit",
            LoginField::Contact => "type contact │ ←/→ email/phone │ Enter send code",
            LoginField::Code => "type 6-digit code │ Enter verify │ ↑ back",
        },
        ScreenKind::Pilgrim => "s SOS │ f lost & found │ r safe route │ i session │ x logout",
        ScreenKind::Command => "Tab/1-5 tabs │ ↑/↓ select │ Enter act │ i session │ x logout",
    }
}

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: hints, uptime and activity count
/// - Narrow: hints only
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let status_text = if bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ ⏱ {} │ 📝 {}",
            hints(app),
            app.uptime(),
            app.log_buffer.len()
        )
    } else {
        format!(" {}", hints(app))
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::session::UserType;
    use tokio::sync::mpsc;

    #[test]
    fn hints_follow_login_focus() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(Config::default(), LogBuffer::new(), tx);
        assert!(hints(&app).contains("1 pilgrim"));

        app.select_mode(UserType::Command);
        assert!(hints(&app).contains("role"));
        app.focus_next();
        assert!(hints(&app).starts_with("type contact"));
    }
}
