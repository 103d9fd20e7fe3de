//! Pilgrim companion screen state
//!
//! Connectivity and location arrive asynchronously after mount. The SOS
//! flag clears itself after a fixed period via a timer event.

use super::{Notice, ScreenRejection};
use crate::events::AppEvent;
use crate::signals::{Coordinates, FALLBACK_LOCATION};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const SAFETY_TIPS: [&str; 3] = [
    "Stay hydrated and avoid overcrowded areas",
    "Keep emergency contacts ready",
    "Follow official announcements",
];

/// Heatmap legend entries: (level, caption)
pub const HEATMAP_LEGEND: [(CrowdLevel, &str); 3] = [
    (CrowdLevel::Low, "Safe"),
    (CrowdLevel::Medium, "Moderate"),
    (CrowdLevel::High, "Crowded"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrowdLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl CrowdLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CrowdLevel::Low => "Low",
            CrowdLevel::Medium => "Medium",
            CrowdLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PilgrimScreen {
    mount: u64,
    online: bool,
    location: Option<Coordinates>,
    crowd_level: CrowdLevel,
    sos_active: bool,
}

impl PilgrimScreen {
    /// Fresh state for a new mount; online until told otherwise
    pub fn new(mount: u64) -> Self {
        Self {
            mount,
            online: true,
            location: None,
            crowd_level: CrowdLevel::Low,
            sos_active: false,
        }
    }

    pub fn mount(&self) -> u64 {
        self.mount
    }

    pub fn online(&self) -> bool {
        self.online
    }

    /// `None` while the location lookup is outstanding
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn crowd_level(&self) -> CrowdLevel {
        self.crowd_level
    }

    pub fn sos_active(&self) -> bool {
        self.sos_active
    }

    /// Apply a background event; false if it belongs to another mount
    pub fn apply(&mut self, event: &AppEvent) -> bool {
        match *event {
            AppEvent::Location { mount, coordinates } if mount == self.mount => {
                self.location = Some(coordinates);
                true
            }
            AppEvent::Connectivity { mount, online } if mount == self.mount => {
                if self.online != online {
                    tracing::info!("Connectivity changed: online={}", online);
                }
                self.online = online;
                true
            }
            AppEvent::SosExpired { mount } if mount == self.mount => {
                self.sos_active = false;
                true
            }
            _ => false,
        }
    }

    /// Raise SOS; refused while one is already showing
    pub fn trigger_sos(&mut self) -> Result<Notice, ScreenRejection> {
        if self.sos_active {
            return Err(ScreenRejection::SosAlreadyActive);
        }
        self.sos_active = true;

        let location = self.location.unwrap_or(FALLBACK_LOCATION);
        tracing::warn!("SOS raised at {}", location.display(4));
        Ok(
            Notice::new("🚨 SOS Alert Sent! Emergency services are being notified.")
                .with_detail(format!("Location: {}", location.display(4))),
        )
    }

    pub fn lost_and_found(&self) -> Notice {
        Notice::new("📸 Opening camera for lost person report...")
            .with_detail("AI will analyze the photo and search CCTV feeds")
    }

    pub fn safe_route(&self) -> Notice {
        Notice::new("🗺️ Finding safest route...")
            .with_detail("Avoiding crowded areas and guiding to safe zones")
    }
}

/// Schedule the SOS auto-clear for this mount
pub fn spawn_sos_timer(mount: u64, duration: Duration, tx: mpsc::Sender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        let _ = tx.send(AppEvent::SosExpired { mount }).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_online_low_crowd_without_sos() {
        let screen = PilgrimScreen::new(1);
        assert!(screen.online());
        assert!(!screen.sos_active());
        assert_eq!(screen.crowd_level(), CrowdLevel::Low);
        assert!(screen.location().is_none());
    }

    #[test]
    fn second_sos_is_refused_while_active() {
        let mut screen = PilgrimScreen::new(1);
        let notice = screen.trigger_sos().unwrap();
        assert_eq!(
            notice.detail.as_deref(),
            Some("Location: 23.1765, 75.7885")
        );

        assert_eq!(screen.trigger_sos(), Err(ScreenRejection::SosAlreadyActive));
    }

    #[test]
    fn events_for_other_mounts_are_ignored() {
        let mut screen = PilgrimScreen::new(2);
        screen.trigger_sos().unwrap();

        assert!(!screen.apply(&AppEvent::SosExpired { mount: 1 }));
        assert!(screen.sos_active());
        assert!(!screen.apply(&AppEvent::Connectivity {
            mount: 1,
            online: false
        }));
        assert!(screen.online());

        assert!(screen.apply(&AppEvent::SosExpired { mount: 2 }));
        assert!(!screen.sos_active());
    }

    #[test]
    fn location_update_is_used_for_sos() {
        let mut screen = PilgrimScreen::new(5);
        screen.apply(&AppEvent::Location {
            mount: 5,
            coordinates: Coordinates {
                lat: 19.9975,
                lng: 73.7898,
            },
        });

        let notice = screen.trigger_sos().unwrap();
        assert_eq!(
            notice.detail.as_deref(),
            Some("Location: 19.9975, 73.7898")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sos_clears_after_duration() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut screen = PilgrimScreen::new(9);
        screen.trigger_sos().unwrap();

        spawn_sos_timer(9, Duration::from_secs(10), tx);
        let start = tokio::time::Instant::now();
        let event = rx.recv().await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(10));
        assert!(screen.apply(&event));
        assert!(!screen.sos_active());
        assert!(screen.trigger_sos().is_ok());
    }
}
