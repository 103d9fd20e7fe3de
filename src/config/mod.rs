//! Application configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/safeyatra/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::session::Language;
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod device;
mod observability;
mod serialization;
mod timing;

#[cfg(test)]
mod tests;

pub use device::{DeviceConfig, FileDevice};
pub use observability::{LogFile, LogRotation, LoggingConfig};
pub use timing::{FileTiming, TimingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default theme name
pub const DEFAULT_THEME: &str = "saffron";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "saffron", "night", "auto"
    pub theme: String,

    /// Initial language of the login form
    pub language: Language,

    /// Whether to run the TUI (disabled for the headless walkthrough)
    pub enable_tui: bool,

    pub timing: TimingConfig,

    pub device: DeviceConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            language: Language::En,
            enable_tui: true,
            timing: TimingConfig::default(),
            device: DeviceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub language: Option<String>,

    /// Optional [timing] section
    pub timing: Option<FileTiming>,

    /// Optional [device] section
    pub device: Option<FileDevice>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/safeyatra/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("safeyatra").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed:
    /// a broken config must not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Numbers written as strings (latitude = 23.17, not \"23.17\")");
                    eprintln!("    - Typos in section names ([timing], [device], [logging])\n");
                    eprintln!("  To reset, run `safeyatra config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env("SAFEYATRA_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Language: env > file > default. Each layer is parsed on its own so
        // an unknown env code still lets the file choose.
        let language = env("SAFEYATRA_LANGUAGE")
            .and_then(|code| {
                let parsed = Language::from_code(&code);
                if parsed.is_none() {
                    eprintln!("Ignoring unknown SAFEYATRA_LANGUAGE {:?} (expected en, hi or mr)", code);
                }
                parsed
            })
            .or_else(|| file.language.as_deref().and_then(Language::from_code))
            .unwrap_or_default();

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("SAFEYATRA_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let timing = TimingConfig::from_file(file.timing);
        let device = DeviceConfig::from_file(
            file.device,
            env("SAFEYATRA_LOCATION"),
            env("SAFEYATRA_PROBE"),
        );
        let logging = file.logging.unwrap_or_default();

        Self {
            theme,
            language,
            enable_tui,
            timing,
            device,
            logging,
        }
    }
}
