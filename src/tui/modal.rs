// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    Close,
    /// Copy the modal's content to the clipboard
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts for the current screen
    Help,
    /// Current session as JSON
    Session,
}

impl Modal {
    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
            Modal::Session => match key {
                KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Char('y') => ModalAction::Copy,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_toggle_key() {
        assert_eq!(Modal::Help.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(Modal::Help.handle_input(KeyCode::Char('y')), ModalAction::None);
    }

    #[test]
    fn session_modal_copies() {
        assert_eq!(Modal::Session.handle_input(KeyCode::Char('y')), ModalAction::Copy);
        assert_eq!(Modal::Session.handle_input(KeyCode::Esc), ModalAction::Close);
    }
}
