// Theme support for the TUI
//
// "auto" uses the terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Surface
    pub foreground: Color,
    pub background: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Chrome
    pub title: Color,
    pub status_bar: Color,
    pub highlight: Color,
    /// Primary accent for the pilgrim app
    pub pilgrim: Color,
    /// Primary accent for the command center
    pub command: Color,

    // Semantic
    pub ok: Color,
    pub warn: Color,
    pub danger: Color,
    pub info: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to "auto"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "saffron" => Self::saffron(),
            "night" => Self::night(),
            _ => Self::auto(),
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            foreground: Color::Reset,
            background: Color::Reset,
            muted: Color::DarkGray,
            border: Color::White,
            border_type: BorderType::Plain,
            title: Color::Cyan,
            status_bar: Color::Green,
            highlight: Color::Yellow,
            pilgrim: Color::LightRed,
            command: Color::LightBlue,
            ok: Color::Green,
            warn: Color::Yellow,
            danger: Color::Red,
            info: Color::Cyan,
        }
    }

    /// Warm orange palette, the default
    pub fn saffron() -> Self {
        Self {
            name: "saffron".to_string(),
            foreground: Color::Rgb(0x1f, 0x29, 0x37),  // gray-800
            background: Color::Rgb(0xff, 0xf7, 0xed),  // orange-50
            muted: Color::Rgb(0x6b, 0x72, 0x80),       // gray-500
            border: Color::Rgb(0xfd, 0xba, 0x74),      // orange-300
            border_type: BorderType::Rounded,
            title: Color::Rgb(0xea, 0x58, 0x0c),       // orange-600
            status_bar: Color::Rgb(0x16, 0xa3, 0x4a),  // green-600
            highlight: Color::Rgb(0xf9, 0x73, 0x16),   // orange-500
            pilgrim: Color::Rgb(0xf9, 0x73, 0x16),     // orange-500
            command: Color::Rgb(0x25, 0x63, 0xeb),     // blue-600
            ok: Color::Rgb(0x16, 0xa3, 0x4a),          // green-600
            warn: Color::Rgb(0xca, 0x8a, 0x04),        // yellow-600
            danger: Color::Rgb(0xdc, 0x26, 0x26),      // red-600
            info: Color::Rgb(0x25, 0x63, 0xeb),        // blue-600
        }
    }

    /// Dark slate palette, closer to the command center look
    pub fn night() -> Self {
        Self {
            name: "night".to_string(),
            foreground: Color::Rgb(0xe2, 0xe8, 0xf0),  // slate-200
            background: Color::Rgb(0x0f, 0x17, 0x2a),  // slate-900
            muted: Color::Rgb(0x64, 0x74, 0x8b),       // slate-500
            border: Color::Rgb(0x33, 0x41, 0x55),      // slate-700
            border_type: BorderType::Rounded,
            title: Color::Rgb(0x60, 0xa5, 0xfa),       // blue-400
            status_bar: Color::Rgb(0x4a, 0xde, 0x80),  // green-400
            highlight: Color::Rgb(0xfb, 0x92, 0x3c),   // orange-400
            pilgrim: Color::Rgb(0xfb, 0x92, 0x3c),     // orange-400
            command: Color::Rgb(0x60, 0xa5, 0xfa),     // blue-400
            ok: Color::Rgb(0x4a, 0xde, 0x80),          // green-400
            warn: Color::Rgb(0xfa, 0xcc, 0x15),        // yellow-400
            danger: Color::Rgb(0xf8, 0x71, 0x71),      // red-400
            info: Color::Rgb(0x38, 0xbd, 0xf8),        // sky-400
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::saffron()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(Theme::by_name("Night").name, "night");
        assert_eq!(Theme::by_name("SAFFRON").name, "saffron");
        assert_eq!(Theme::by_name("solarized").name, "auto");
    }
}
