//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` for cross-platform support. The clipboard is created
//! fresh each time to avoid holding resources.

use crate::session::Session;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Pretty JSON of the session, as copied with `y`
pub fn session_json(session: &Session) -> Result<String> {
    serde_json::to_string_pretty(session).context("Failed to serialize session")
}
