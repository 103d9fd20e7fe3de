// TUI application state
//
// App owns the router plus whatever per-screen state is currently mounted.
// Screen state is created when a screen mounts and dropped when it
// unmounts; async completions for a dropped screen are recognised by their
// generation or mount id and ignored.

use super::components::toast::Toast;
use super::input::KeyGate;
use super::modal::Modal;
use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::login::gateway::{spawn_code_request, spawn_verification};
use crate::login::{Contact, LoginFlow, LoginPhase, LoginRejection, SimulatedGateway};
use crate::router::{Router, Screen};
use crate::screens::pilgrim::spawn_sos_timer;
use crate::screens::{CommandScreen, Notice, PilgrimScreen, ScreenRejection};
use crate::session::{Session, UserType};
use crate::signals::DeviceSignals;
use crate::theme::Theme;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Which top-level screen is showing, without borrowing the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    ModeSelect,
    Login,
    Pilgrim,
    Command,
}

/// Focusable rows of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Language,
    Role,
    Contact,
    Code,
}

/// Main application state for the TUI
pub struct App {
    pub theme: Theme,
    pub router: Router,

    /// Highlighted card on the mode selection screen (0 = pilgrim)
    pub mode_cursor: usize,

    /// Mounted while the router is in LoggingIn
    pub login: Option<LoginFlow>,
    pub login_focus: LoginField,

    /// Mounted while a pilgrim session is active
    pub pilgrim: Option<PilgrimScreen>,
    /// Mounted while a command session is active
    pub command: Option<CommandScreen>,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,

    /// Activity panel (captured tracing output) toggle
    pub show_activity: bool,
    pub log_buffer: LogBuffer,

    pub key_gate: KeyGate,
    pub should_quit: bool,

    config: Config,
    gateway: Arc<SimulatedGateway>,
    signals: DeviceSignals,
    events_tx: mpsc::Sender<AppEvent>,
    mounts: u64,
    animation_frame: usize,
    start_time: Instant,
}

impl App {
    pub fn new(config: Config, log_buffer: LogBuffer, events_tx: mpsc::Sender<AppEvent>) -> Self {
        let gateway = Arc::new(SimulatedGateway::new(
            config.timing.send_code_delay(),
            config.timing.verify_delay(),
        ));
        let signals = DeviceSignals::from_config(&config.device);

        Self {
            theme: Theme::by_name(&config.theme),
            router: Router::new(),
            mode_cursor: 0,
            login: None,
            login_focus: LoginField::Contact,
            pilgrim: None,
            command: None,
            modal: None,
            toast: None,
            show_activity: false,
            log_buffer,
            key_gate: KeyGate::new(),
            should_quit: false,
            config,
            gateway,
            signals,
            events_tx,
            mounts: 0,
            animation_frame: 0,
            start_time: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen_kind(&self) -> ScreenKind {
        match self.router.screen() {
            Screen::ModeSelect => ScreenKind::ModeSelect,
            Screen::Login(_) => ScreenKind::Login,
            Screen::Pilgrim(_) => ScreenKind::Pilgrim,
            Screen::Command(_) => ScreenKind::Command,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.router.session()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input plumbing
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.key_gate.press(key)
    }

    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.key_gate.release(key);
    }

    /// Typed characters go to a form field rather than to shortcuts
    ///
    /// Only while the focused field accepts input: a locked contact row
    /// after dispatch leaves the keys to shortcuts.
    pub fn text_entry_active(&self) -> bool {
        self.screen_kind() == ScreenKind::Login && self.focused_field_editable()
    }

    fn focused_field_editable(&self) -> bool {
        let Some(flow) = &self.login else {
            return false;
        };
        match self.login_focus {
            LoginField::Contact => flow.contact_editable(),
            LoginField::Code => flow.code_editable(),
            LoginField::Language | LoginField::Role => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Animation and transient UI
    // ─────────────────────────────────────────────────────────────────────

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, self.config.timing.toast_duration()));
    }

    fn show_notice(&mut self, notice: Notice) {
        self.toast = Some(Toast::from_notice(
            notice,
            self.config.timing.toast_duration(),
        ));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mode selection
    // ─────────────────────────────────────────────────────────────────────

    pub fn mode_cursor_type(&self) -> UserType {
        UserType::ALL[self.mode_cursor.min(UserType::ALL.len() - 1)]
    }

    pub fn move_mode_cursor(&mut self) {
        self.mode_cursor = (self.mode_cursor + 1) % UserType::ALL.len();
    }

    pub fn select_mode(&mut self, user_type: UserType) {
        if let Err(e) = self.router.select_mode(user_type) {
            tracing::debug!("Mode selection ignored: {}", e);
            return;
        }
        self.login = Some(LoginFlow::new(user_type, self.config.language));
        self.login_focus = match user_type {
            UserType::Pilgrim => LoginField::Contact,
            UserType::Command => LoginField::Role,
        };
        self.key_gate.reset();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Login form
    // ─────────────────────────────────────────────────────────────────────

    /// Rows shown for the current flow, top to bottom
    pub fn login_fields(&self) -> Vec<LoginField> {
        let Some(flow) = &self.login else {
            return Vec::new();
        };
        let mut fields = vec![LoginField::Language];
        if flow.user_type() == UserType::Command {
            fields.push(LoginField::Role);
        }
        fields.push(LoginField::Contact);
        if matches!(flow.phase(), LoginPhase::CodeSent | LoginPhase::Verifying) {
            fields.push(LoginField::Code);
        }
        fields
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let fields = self.login_fields();
        if fields.is_empty() {
            return;
        }
        let current = fields
            .iter()
            .position(|f| *f == self.login_focus)
            .unwrap_or(0) as isize;
        let len = fields.len() as isize;
        self.login_focus = fields[(current + step).rem_euclid(len) as usize];
    }

    /// Left/Right/Space on the focused row
    pub fn cycle_focused(&mut self) {
        let Some(flow) = self.login.as_mut() else {
            return;
        };
        match self.login_focus {
            LoginField::Language => flow.cycle_language(),
            LoginField::Role => {
                if let Err(e) = flow.cycle_role() {
                    tracing::debug!("Role change ignored: {}", e);
                }
            }
            LoginField::Contact => flow.toggle_tab(),
            LoginField::Code => {}
        }
    }

    pub fn login_type(&mut self, c: char) {
        if !self.focused_field_editable() {
            return;
        }
        if let Some(flow) = self.login.as_mut() {
            flow.push_char(c);
        }
    }

    pub fn login_backspace(&mut self) {
        if !self.focused_field_editable() {
            return;
        }
        if let Some(flow) = self.login.as_mut() {
            flow.pop_char();
        }
    }

    /// Enter on the form: send code before dispatch, verify after
    pub fn login_submit(&mut self) {
        let Some(flow) = self.login.as_mut() else {
            return;
        };
        let result = match flow.phase() {
            LoginPhase::Idle => flow.request_code().map(|request| {
                spawn_code_request(Arc::clone(&self.gateway), request, self.events_tx.clone());
            }),
            _ => flow.verify_code().map(|request| {
                spawn_verification(Arc::clone(&self.gateway), request, self.events_tx.clone());
            }),
        };
        // Disabled button: nothing to tell the user
        if let Err(e) = result {
            tracing::debug!("Login action disabled: {}", e);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Background completions
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_app_event(&mut self, event: AppEvent) {
        tracing::trace!("App event: {}", event.name());
        match event {
            AppEvent::CodeSent { generation } => self.on_code_sent(generation),
            AppEvent::CodeRequestFailed { generation, error } => {
                let Some(flow) = self.login.as_mut() else {
                    return;
                };
                if flow.code_request_failed(generation).is_ok() {
                    tracing::warn!("Code request failed: {}", error);
                    self.show_notice(Notice::new("Could not send code").with_detail(error));
                }
            }
            AppEvent::Verified {
                generation,
                accepted,
            } => {
                let Some(flow) = self.login.as_mut() else {
                    tracing::debug!("Verification finished after the login screen unmounted");
                    return;
                };
                match flow.complete(generation, accepted) {
                    Ok(session) => self.finish_login(session),
                    Err(LoginRejection::CodeRejected) => {
                        self.show_toast("Invalid code, please try again");
                    }
                    Err(e) => tracing::debug!("Verification result ignored: {}", e),
                }
            }
            AppEvent::VerificationFailed { generation, error } => {
                let Some(flow) = self.login.as_mut() else {
                    return;
                };
                if flow.verification_failed(generation).is_ok() {
                    tracing::warn!("Verification failed: {}", error);
                    self.show_notice(Notice::new("Could not verify code").with_detail(error));
                }
            }
            AppEvent::SosExpired { .. }
            | AppEvent::Location { .. }
            | AppEvent::Connectivity { .. } => {
                let applied = self
                    .pilgrim
                    .as_mut()
                    .is_some_and(|screen| screen.apply(&event));
                if !applied {
                    tracing::debug!("Dropping {} for an unmounted screen", event.name());
                }
            }
        }
    }

    fn on_code_sent(&mut self, generation: u64) {
        let Some(flow) = self.login.as_mut() else {
            return;
        };
        if let Err(e) = flow.code_sent(generation) {
            tracing::debug!("Code confirmation ignored: {}", e);
            return;
        }
        let sent_to = Contact::resolve(&flow.form().email, &flow.form().phone)
            .map(|c| format!("Sent to {}", c))
            .unwrap_or_default();
        self.login_focus = LoginField::Code;
        self.show_notice(Notice::new("📨 Verification code sent").with_detail(sent_to));
    }

    fn finish_login(&mut self, session: Session) {
        let user_type = session.user_type();
        let greeting = format!("Welcome, {}", session.role().label());
        if let Err(e) = self.router.on_login(session) {
            tracing::warn!("Login not accepted: {}", e);
            return;
        }

        self.login = None;
        self.mounts += 1;
        match user_type {
            UserType::Pilgrim => {
                self.pilgrim = Some(PilgrimScreen::new(self.mounts));
                self.signals
                    .spawn_resolve(self.mounts, self.events_tx.clone());
            }
            UserType::Command => {
                self.command = Some(CommandScreen::new(Utc::now()));
            }
        }
        self.key_gate.reset();
        self.show_toast(greeting);
    }

    pub fn logout(&mut self) {
        match self.router.on_logout() {
            Ok(_) => {
                // Drop every screen; late events for them become stale
                self.pilgrim = None;
                self.command = None;
                self.login = None;
                self.modal = None;
                self.mode_cursor = 0;
                self.key_gate.reset();
                self.show_toast("Logged out");
            }
            Err(e) => tracing::debug!("Logout ignored: {}", e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Role screen actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn trigger_sos(&mut self) {
        let Some(screen) = self.pilgrim.as_mut() else {
            return;
        };
        match screen.trigger_sos() {
            Ok(notice) => {
                spawn_sos_timer(
                    screen.mount(),
                    self.config.timing.sos_duration(),
                    self.events_tx.clone(),
                );
                self.toast = Some(
                    Toast::from_notice(notice, self.config.timing.toast_duration()).alert(),
                );
            }
            Err(e) => tracing::debug!("SOS disabled: {}", e),
        }
    }

    pub fn lost_and_found(&mut self) {
        if let Some(notice) = self.pilgrim.as_ref().map(PilgrimScreen::lost_and_found) {
            self.show_notice(notice);
        }
    }

    pub fn safe_route(&mut self) {
        if let Some(notice) = self.pilgrim.as_ref().map(PilgrimScreen::safe_route) {
            self.show_notice(notice);
        }
    }

    /// Run a dashboard action; refusals are disabled buttons, so only logged
    pub fn command_action(
        &mut self,
        action: impl FnOnce(&mut CommandScreen) -> Result<Notice, ScreenRejection>,
    ) {
        let Some(screen) = self.command.as_mut() else {
            return;
        };
        match action(screen) {
            Ok(notice) => self.show_notice(notice),
            Err(e) => tracing::debug!("Dashboard action disabled: {}", e),
        }
    }

    pub fn command_mut(&mut self) -> Option<&mut CommandScreen> {
        self.command.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (App::new(Config::default(), LogBuffer::new(), tx), rx)
    }

    fn type_str(app: &mut App, s: &str) {
        s.chars().for_each(|c| app.login_type(c));
    }

    async fn pump(app: &mut App, rx: &mut mpsc::Receiver<AppEvent>) {
        let event = rx.recv().await.unwrap();
        app.handle_app_event(event);
    }

    #[tokio::test(start_paused = true)]
    async fn pilgrim_login_mounts_pilgrim_screen() {
        let (mut app, mut rx) = app();
        app.select_mode(UserType::Pilgrim);
        assert_eq!(app.screen_kind(), ScreenKind::Login);
        assert!(app.text_entry_active());

        type_str(&mut app, "yatri@example.com");
        app.login_submit();
        pump(&mut app, &mut rx).await;
        assert_eq!(app.login_focus, LoginField::Code);

        type_str(&mut app, "123456");
        app.login_submit();
        pump(&mut app, &mut rx).await;

        assert_eq!(app.screen_kind(), ScreenKind::Pilgrim);
        assert!(app.login.is_none());
        assert_eq!(app.session().unwrap().email(), "yatri@example.com");

        // Location then connectivity for the new mount
        pump(&mut app, &mut rx).await;
        pump(&mut app, &mut rx).await;
        assert!(app.pilgrim.as_ref().unwrap().location().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn command_login_requires_role() {
        let (mut app, mut rx) = app();
        app.select_mode(UserType::Command);
        assert_eq!(app.login_focus, LoginField::Role);

        app.focus_next();
        type_str(&mut app, "ops@example.com");
        app.login_submit();
        assert_eq!(app.login.as_ref().unwrap().phase(), LoginPhase::Idle);

        app.focus_prev();
        app.cycle_focused();
        assert_eq!(app.login.as_ref().unwrap().form().role, Some(Role::Admin));
        app.login_submit();
        pump(&mut app, &mut rx).await;

        type_str(&mut app, "654321");
        app.login_submit();
        pump(&mut app, &mut rx).await;

        assert_eq!(app.screen_kind(), ScreenKind::Command);
        assert_eq!(app.session().unwrap().role(), Role::Admin);
    }

    #[tokio::test(start_paused = true)]
    async fn sos_expiry_after_logout_is_ignored() {
        let (mut app, mut rx) = app();
        app.select_mode(UserType::Pilgrim);
        type_str(&mut app, "+91 99999 00000");
        app.login_submit();
        pump(&mut app, &mut rx).await;
        type_str(&mut app, "000000");
        app.login_submit();
        pump(&mut app, &mut rx).await;
        pump(&mut app, &mut rx).await;
        pump(&mut app, &mut rx).await;

        app.trigger_sos();
        assert!(app.pilgrim.as_ref().unwrap().sos_active());
        app.logout();
        assert_eq!(app.screen_kind(), ScreenKind::ModeSelect);

        // Timer still fires; nothing is mounted to receive it
        pump(&mut app, &mut rx).await;
        assert!(app.pilgrim.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn locked_contact_row_takes_no_typing() {
        let (mut app, mut rx) = app();
        app.select_mode(UserType::Pilgrim);
        type_str(&mut app, "a@b.com");
        app.login_submit();
        pump(&mut app, &mut rx).await;
        assert_eq!(app.login_focus, LoginField::Code);

        app.focus_prev();
        assert_eq!(app.login_focus, LoginField::Contact);
        assert!(!app.text_entry_active());

        type_str(&mut app, "q12");
        app.login_backspace();
        let form = app.login.as_ref().unwrap().form();
        assert_eq!(form.code, "");
        assert_eq!(form.email, "a@b.com");

        app.focus_next();
        assert!(app.text_entry_active());
        type_str(&mut app, "12");
        assert_eq!(app.login.as_ref().unwrap().form().code, "12");
    }

    #[test]
    fn language_row_is_not_text_entry() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(Config::default(), LogBuffer::new(), tx);
        app.select_mode(UserType::Pilgrim);
        app.focus_prev();
        assert_eq!(app.login_focus, LoginField::Language);
        assert!(!app.text_entry_active());

        type_str(&mut app, "x");
        assert_eq!(app.login.as_ref().unwrap().form().email, "");
    }

    #[test]
    fn focus_wraps_around_visible_fields() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(Config::default(), LogBuffer::new(), tx);
        app.select_mode(UserType::Pilgrim);

        assert_eq!(
            app.login_fields(),
            vec![LoginField::Language, LoginField::Contact]
        );
        app.focus_next();
        assert_eq!(app.login_focus, LoginField::Language);
        app.focus_prev();
        assert_eq!(app.login_focus, LoginField::Contact);
    }

    #[test]
    fn mode_cursor_toggles() {
        let (tx, _rx) = mpsc::channel(1);
        let mut app = App::new(Config::default(), LogBuffer::new(), tx);
        assert_eq!(app.mode_cursor_type(), UserType::Pilgrim);
        app.move_mode_cursor();
        assert_eq!(app.mode_cursor_type(), UserType::Command);
        app.move_mode_cursor();
        assert_eq!(app.mode_cursor_type(), UserType::Pilgrim);
    }
}
