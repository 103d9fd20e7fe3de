// Role screens - local, display-only state for each authenticated view
//
// Screen state is created on mount and dropped on logout. Nothing here
// feeds back into the session or the router: actions only produce
// notices (toasts) or refusals.

pub mod command;
pub mod pilgrim;

pub use command::CommandScreen;
pub use pilgrim::PilgrimScreen;

use std::fmt;

/// Toast-worthy message produced by a screen action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Screen action refused because its control would be disabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRejection {
    SosAlreadyActive,
    UnknownAlert(u32),
    AlertNotActive(u32),
    UnknownDrone(String),
    DroneAlreadyActive(String),
    /// Current tab has no actionable item
    NothingSelected,
}

impl fmt::Display for ScreenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SosAlreadyActive => write!(f, "SOS is already active"),
            Self::UnknownAlert(id) => write!(f, "no alert with id {}", id),
            Self::AlertNotActive(id) => write!(f, "alert {} is not active", id),
            Self::UnknownDrone(id) => write!(f, "no drone {}", id),
            Self::DroneAlreadyActive(id) => write!(f, "drone {} is already active", id),
            Self::NothingSelected => write!(f, "nothing to act on here"),
        }
    }
}

impl std::error::Error for ScreenRejection {}
