//! `[logging]` section: filter level and the optional JSON log file
//!
//! The file sink is off unless a `[logging.file]` table is present, so
//! there is no separate enable flag to keep in sync.

use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::rolling::{self, RollingFileAppender};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter for this crate's targets: trace, debug, info, warn, error
    pub level: String,
    pub file: Option<LogFile>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Where JSON log lines go and how often the file rolls over
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogFile {
    pub dir: PathBuf,
    /// "safeyatra" -> "safeyatra.2028-04-09"
    pub prefix: String,
    pub rotation: LogRotation,
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs"),
            prefix: env!("CARGO_PKG_NAME").to_string(),
            rotation: LogRotation::Daily,
        }
    }
}

impl LogFile {
    /// Appender for this file; `dir` must exist before the first write
    pub fn appender(&self) -> RollingFileAppender {
        match self.rotation {
            LogRotation::Hourly => rolling::hourly(&self.dir, &self.prefix),
            LogRotation::Daily => rolling::daily(&self.dir, &self.prefix),
            LogRotation::Never => rolling::never(&self.dir, &self.prefix),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}
