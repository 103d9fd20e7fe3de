//! Timing knobs for simulated latency and transient UI state

use serde::Deserialize;
use std::time::Duration;

/// Delays and lifetimes, all overridable from `[timing]`
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Simulated latency of "send code"
    pub send_code_delay_ms: u64,
    /// Simulated latency of "verify"
    pub verify_delay_ms: u64,
    /// How long an SOS stays active before auto-clearing
    pub sos_duration_secs: u64,
    /// Toast lifetime
    pub toast_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            send_code_delay_ms: 2000,
            verify_delay_ms: 1500,
            sos_duration_secs: 10,
            toast_secs: 3,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileTiming {
    pub send_code_delay_ms: Option<u64>,
    pub verify_delay_ms: Option<u64>,
    pub sos_duration_secs: Option<u64>,
    pub toast_secs: Option<u64>,
}

impl TimingConfig {
    pub fn from_file(file: Option<FileTiming>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            send_code_delay_ms: file.send_code_delay_ms.unwrap_or(defaults.send_code_delay_ms),
            verify_delay_ms: file.verify_delay_ms.unwrap_or(defaults.verify_delay_ms),
            sos_duration_secs: file.sos_duration_secs.unwrap_or(defaults.sos_duration_secs),
            // A zero-second toast would never be seen
            toast_secs: file.toast_secs.unwrap_or(defaults.toast_secs).max(1),
        }
    }

    pub fn send_code_delay(&self) -> Duration {
        Duration::from_millis(self.send_code_delay_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    pub fn sos_duration(&self) -> Duration {
        Duration::from_secs(self.sos_duration_secs)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}
