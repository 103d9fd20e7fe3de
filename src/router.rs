// View router - decides which top-level screen is mounted
//
//   SelectingMode ──select_mode(t)──▶ LoggingIn(t) ──on_login(s)──▶ Authenticated(s)
//        ▲                                                                │
//        └──────────────────────────────on_logout()───────────────────────┘
//
// There is deliberately no LoggingIn → SelectingMode edge; the login
// screen has no "change mode" control.

use crate::session::{Session, UserType};
use std::fmt;

/// The single source of truth for what is on screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    SelectingMode,
    LoggingIn(UserType),
    Authenticated(Session),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::SelectingMode => "selecting_mode",
            ViewState::LoggingIn(_) => "logging_in",
            ViewState::Authenticated(_) => "authenticated",
        }
    }
}

/// What to render for the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    ModeSelect,
    Login(UserType),
    Pilgrim(&'a Session),
    Command(&'a Session),
}

/// Transition that is not an edge of the router graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
    /// Session produced for a different user type than the one logging in
    UserTypeMismatch {
        expected: UserType,
        got: UserType,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                write!(f, "cannot {} while {}", action, from)
            }
            Self::UserTypeMismatch { expected, got } => {
                write!(f, "expected a {} session, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Owns the view state; collaborators only see it through `screen()`
#[derive(Debug, Default)]
pub struct Router {
    state: ViewState,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ViewState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Pure mapping from state to screen
    pub fn screen(&self) -> Screen<'_> {
        match &self.state {
            ViewState::SelectingMode => Screen::ModeSelect,
            ViewState::LoggingIn(user_type) => Screen::Login(*user_type),
            ViewState::Authenticated(session) => match session.user_type() {
                UserType::Pilgrim => Screen::Pilgrim(session),
                UserType::Command => Screen::Command(session),
            },
        }
    }

    pub fn select_mode(&mut self, user_type: UserType) -> Result<(), RouteError> {
        if self.state != ViewState::SelectingMode {
            return Err(self.invalid("select a mode"));
        }
        tracing::info!("Mode selected: {}", user_type);
        self.state = ViewState::LoggingIn(user_type);
        Ok(())
    }

    /// Login flow finished; mount the matching role screen
    pub fn on_login(&mut self, session: Session) -> Result<(), RouteError> {
        let ViewState::LoggingIn(expected) = self.state else {
            return Err(self.invalid("log in"));
        };
        if session.user_type() != expected {
            return Err(RouteError::UserTypeMismatch {
                expected,
                got: session.user_type(),
            });
        }
        tracing::info!("Logged in: {} (session {})", session.summary(), session.id());
        self.state = ViewState::Authenticated(session);
        Ok(())
    }

    /// Drop the session and go back to mode selection
    pub fn on_logout(&mut self) -> Result<Session, RouteError> {
        match std::mem::take(&mut self.state) {
            ViewState::Authenticated(session) => {
                tracing::info!("Logged out: session {}", session.id());
                Ok(session)
            }
            other => {
                self.state = other;
                Err(self.invalid("log out"))
            }
        }
    }

    fn invalid(&self, action: &'static str) -> RouteError {
        let err = RouteError::InvalidTransition {
            from: self.state.name(),
            action,
        };
        tracing::debug!("Router: {}", err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Language, Role};

    fn session_for(user_type: UserType) -> Session {
        let role = match user_type {
            UserType::Pilgrim => None,
            UserType::Command => Some(Role::Coordinator),
        };
        Session::establish(user_type, role, "a@b.com", "", Language::En).unwrap()
    }

    #[test]
    fn starts_in_mode_selection() {
        let router = Router::new();
        assert_eq!(router.state, ViewState::SelectingMode);
        assert_eq!(router.screen(), Screen::ModeSelect);
        assert!(router.session().is_none());
    }

    #[test]
    fn selecting_a_mode_always_enters_login() {
        for user_type in UserType::ALL {
            let mut router = Router::new();
            router.select_mode(user_type).unwrap();
            assert_eq!(router.state, ViewState::LoggingIn(user_type));
            assert_eq!(router.screen(), Screen::Login(user_type));
        }
    }

    #[test]
    fn cannot_reselect_mode_while_logging_in() {
        let mut router = Router::new();
        router.select_mode(UserType::Pilgrim).unwrap();

        assert!(router.select_mode(UserType::Command).is_err());
        assert_eq!(router.state, ViewState::LoggingIn(UserType::Pilgrim));
    }

    #[test]
    fn login_mounts_matching_screen() {
        for user_type in UserType::ALL {
            let mut router = Router::new();
            router.select_mode(user_type).unwrap();
            router.on_login(session_for(user_type)).unwrap();

            let session = router.session().unwrap();
            assert_eq!(session.user_type(), user_type);
            match (user_type, router.screen()) {
                (UserType::Pilgrim, Screen::Pilgrim(_)) | (UserType::Command, Screen::Command(_)) => {}
                (_, other) => panic!("wrong screen: {:?}", other),
            }
        }
    }

    #[test]
    fn login_with_mismatched_session_is_rejected() {
        let mut router = Router::new();
        router.select_mode(UserType::Pilgrim).unwrap();

        let err = router.on_login(session_for(UserType::Command)).unwrap_err();
        assert_eq!(
            err,
            RouteError::UserTypeMismatch {
                expected: UserType::Pilgrim,
                got: UserType::Command
            }
        );
        assert_eq!(router.state, ViewState::LoggingIn(UserType::Pilgrim));
    }

    #[test]
    fn login_outside_logging_in_is_rejected() {
        let mut router = Router::new();
        assert!(router.on_login(session_for(UserType::Pilgrim)).is_err());
        assert_eq!(router.state, ViewState::SelectingMode);
    }

    #[test]
    fn logout_returns_to_mode_selection_without_session() {
        let mut router = Router::new();
        router.select_mode(UserType::Command).unwrap();
        let session = session_for(UserType::Command);
        let id = session.id().clone();
        router.on_login(session).unwrap();

        let dropped = router.on_logout().unwrap();
        assert_eq!(dropped.id(), &id);
        assert_eq!(router.state, ViewState::SelectingMode);
        assert!(router.session().is_none());
    }

    #[test]
    fn logout_without_session_keeps_state() {
        let mut router = Router::new();
        router.select_mode(UserType::Pilgrim).unwrap();

        assert!(router.on_logout().is_err());
        assert_eq!(router.state, ViewState::LoggingIn(UserType::Pilgrim));
    }
}
