// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, background completions)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod views;

use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::session::UserType;
use anyhow::{Context, Result};
use app::{App, LoginField, ScreenKind};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Background completions queued between two frames
const EVENT_CHANNEL_SIZE: usize = 64;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, whether or not the loop failed.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let mut app = App::new(config, log_buffer, event_tx);

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, the redraw tick and background completions,
/// responding to whichever arrives first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
                app.clear_expired_toast();
            }

            Some(app_event) = event_rx.recv() => {
                app.handle_app_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Text entry → Global → Screen
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Ctrl+C always quits, even mid-typing
    if key_event.kind == KeyEventKind::Press
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return;
        }
        _ => return,
    }

    if handle_text_entry(app, &key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    let key = key_event.code;
    if !app.handle_key_press(key) {
        return;
    }

    match app.screen_kind() {
        ScreenKind::ModeSelect => handle_mode_select_keys(app, key),
        ScreenKind::Login => handle_login_keys(app, key),
        ScreenKind::Pilgrim => handle_pilgrim_keys(app, key),
        ScreenKind::Command => handle_command_keys(app, key),
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = app.modal.clone() else {
        return false;
    };

    // Release events still reach the key gate, or keys stick after close
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }

    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Copy => copy_session(app),
    }

    true
}

/// Characters typed into a focused text field bypass shortcuts and debounce
fn handle_text_entry(app: &mut App, key_event: &KeyEvent) -> bool {
    if !app.text_entry_active() {
        return false;
    }

    match key_event.code {
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login_type(c);
            true
        }
        KeyCode::Backspace => {
            app.login_backspace();
            true
        }
        _ => false,
    }
}

/// Handle global keys - returns true if handled
/// Each action key fires once per press through the key gate
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
            true
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::Help);
            }
            true
        }
        KeyCode::Char('a') | KeyCode::F(2) => {
            if app.handle_key_press(key) {
                app.show_activity = !app.show_activity;
            }
            true
        }
        // Session details only exist once logged in
        KeyCode::Char('i') if app.session().is_some() => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::Session);
            }
            true
        }
        KeyCode::Char('y') if app.session().is_some() => {
            if app.handle_key_press(key) {
                copy_session(app);
            }
            true
        }
        _ => false,
    }
}

fn handle_mode_select_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Char('j')
        | KeyCode::Char('k') => app.move_mode_cursor(),
        KeyCode::Char('1') | KeyCode::Char('p') => app.select_mode(UserType::Pilgrim),
        KeyCode::Char('2') | KeyCode::Char('c') => app.select_mode(UserType::Command),
        KeyCode::Enter => app.select_mode(app.mode_cursor_type()),
        _ => {}
    }
}

fn handle_login_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.login_focus != LoginField::Code =>
        {
            app.cycle_focused()
        }
        KeyCode::Enter => app.login_submit(),
        _ => {}
    }
}

fn handle_pilgrim_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('s') | KeyCode::Char('S') => app.trigger_sos(),
        KeyCode::Char('f') => app.lost_and_found(),
        KeyCode::Char('r') => app.safe_route(),
        KeyCode::Char('x') => app.logout(),
        _ => {}
    }
}

fn handle_command_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('x') => {
            app.logout();
            return;
        }
        KeyCode::Enter => {
            app.command_action(|screen| screen.activate_selected());
            return;
        }
        _ => {}
    }

    let Some(screen) = app.command_mut() else {
        return;
    };
    match key {
        KeyCode::Tab | KeyCode::Right => screen.next_tab(),
        KeyCode::BackTab | KeyCode::Left => screen.prev_tab(),
        KeyCode::Char(c @ '1'..='5') => screen.select_tab((c as usize) - ('1' as usize)),
        KeyCode::Down | KeyCode::Char('j') => screen.select_next(),
        KeyCode::Up | KeyCode::Char('k') => screen.select_prev(),
        _ => {}
    }
}

fn copy_session(app: &mut App) {
    let Some(session) = app.session() else {
        return;
    };
    let copied =
        clipboard::session_json(session).and_then(|json| clipboard::copy_to_clipboard(&json));
    match copied {
        Ok(()) => app.show_toast("✓ Copied session to clipboard"),
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            app.show_toast("✗ Failed to copy");
        }
    }
}
