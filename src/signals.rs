//! Best-effort device signals for the pilgrim screen
//!
//! A terminal has no geolocation API and no online/offline events, so both
//! signals come from configuration or a cheap probe. Whenever a signal is
//! unavailable the documented fallback is used instead of failing.

use crate::config::DeviceConfig;
use crate::events::AppEvent;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

/// Demo coordinates (Ujjain) used when no location is available
pub const FALLBACK_LOCATION: Coordinates = Coordinates {
    lat: 23.1765,
    lng: 75.7885,
};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Parse "lat,lng"; rejects out-of-range values
    pub fn parse(s: &str) -> Option<Self> {
        let (lat, lng) = s.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// Display with the given number of decimals, e.g. "23.1765, 75.7885"
    pub fn display(&self, decimals: usize) -> String {
        format!("{:.*}, {:.*}", decimals, self.lat, decimals, self.lng)
    }
}

/// Resolves location and connectivity from configuration
#[derive(Debug, Clone)]
pub struct DeviceSignals {
    location: Option<Coordinates>,
    probe: Option<String>,
    probe_timeout: Duration,
}

impl DeviceSignals {
    pub fn from_config(device: &DeviceConfig) -> Self {
        Self {
            location: device.location,
            probe: device.connectivity_probe.clone(),
            probe_timeout: Duration::from_millis(device.probe_timeout_ms),
        }
    }

    /// Configured location, or the fallback constant
    pub fn location(&self) -> Coordinates {
        self.location.unwrap_or_else(|| {
            tracing::debug!("No device location configured, using fallback");
            FALLBACK_LOCATION
        })
    }

    /// Whether the probe endpoint is reachable; `true` when no probe is set
    pub async fn is_online(&self) -> bool {
        let Some(addr) = self.probe.as_deref() else {
            return true;
        };

        match tokio::time::timeout(self.probe_timeout, tokio::net::TcpStream::connect(addr)).await
        {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::info!("Connectivity probe {} failed: {}", addr, e);
                false
            }
            Err(_) => {
                tracing::info!("Connectivity probe {} timed out", addr);
                false
            }
        }
    }

    /// Resolve both signals in the background for a pilgrim screen mount
    pub fn spawn_resolve(&self, mount: u64, tx: mpsc::Sender<AppEvent>) {
        let signals = self.clone();
        tokio::spawn(async move {
            let coordinates = signals.location();
            if tx
                .send(AppEvent::Location { mount, coordinates })
                .await
                .is_err()
            {
                return;
            }
            let online = signals.is_online().await;
            let _ = tx.send(AppEvent::Connectivity { mount, online }).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(location: Option<Coordinates>, probe: Option<&str>) -> DeviceSignals {
        DeviceSignals {
            location,
            probe: probe.map(str::to_string),
            probe_timeout: Duration::from_millis(200),
        }
    }

    #[test]
    fn parses_coordinates() {
        assert_eq!(
            Coordinates::parse("23.18, 75.79"),
            Some(Coordinates {
                lat: 23.18,
                lng: 75.79
            })
        );
        assert_eq!(Coordinates::parse("95,10"), None);
        assert_eq!(Coordinates::parse("north"), None);
    }

    #[test]
    fn missing_location_uses_fallback() {
        assert_eq!(signals(None, None).location(), FALLBACK_LOCATION);
        assert_eq!(FALLBACK_LOCATION.display(4), "23.1765, 75.7885");
    }

    #[tokio::test]
    async fn no_probe_means_online() {
        assert!(signals(None, None).is_online().await);
    }

    #[tokio::test]
    async fn reachable_probe_reports_online() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        assert!(signals(None, Some(&addr)).is_online().await);
    }

    #[tokio::test]
    async fn unreachable_probe_reports_offline() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        assert!(!signals(None, Some(&addr)).is_online().await);
    }

    #[tokio::test]
    async fn resolve_sends_location_then_connectivity() {
        let (tx, mut rx) = mpsc::channel(4);
        let here = Coordinates {
            lat: 19.99,
            lng: 73.78,
        };
        signals(Some(here), None).spawn_resolve(3, tx);

        assert_eq!(
            rx.recv().await,
            Some(AppEvent::Location {
                mount: 3,
                coordinates: here
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(AppEvent::Connectivity {
                mount: 3,
                online: true
            })
        );
    }
}
