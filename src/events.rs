// Events that flow from background tasks to the event loop
//
// Simulated network calls, timers and device probes all run on spawned
// tokio tasks. They never touch UI state directly; they send one of these
// messages and the event loop applies it. Each variant carries the
// generation of the flow or screen mount that issued it, so results that
// outlive their screen are recognised and discarded.

use crate::signals::Coordinates;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// One-time code was dispatched
    CodeSent { generation: u64 },

    /// Code dispatch failed in the gateway
    CodeRequestFailed { generation: u64, error: String },

    /// Gateway finished checking the code
    Verified { generation: u64, accepted: bool },

    /// Gateway errored while checking the code
    VerificationFailed { generation: u64, error: String },

    /// SOS display period ended
    SosExpired { mount: u64 },

    /// Best-effort device location resolved
    Location { mount: u64, coordinates: Coordinates },

    /// Best-effort connectivity check finished
    Connectivity { mount: u64, online: bool },
}

impl AppEvent {
    /// Short name for debug logging
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::CodeSent { .. } => "code_sent",
            AppEvent::CodeRequestFailed { .. } => "code_request_failed",
            AppEvent::Verified { .. } => "verified",
            AppEvent::VerificationFailed { .. } => "verification_failed",
            AppEvent::SosExpired { .. } => "sos_expired",
            AppEvent::Location { .. } => "location",
            AppEvent::Connectivity { .. } => "connectivity",
        }
    }
}
