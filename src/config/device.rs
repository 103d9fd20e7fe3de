//! Device signal sources: location and connectivity probe

use crate::signals::Coordinates;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Fixed device location; `None` means use the fallback
    pub location: Option<Coordinates>,
    /// host:port to TCP-connect for the online badge; `None` means always online
    pub connectivity_probe: Option<String>,
    pub probe_timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            location: None,
            connectivity_probe: None,
            probe_timeout_ms: 1500,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDevice {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub connectivity_probe: Option<String>,
    pub probe_timeout_ms: Option<u64>,
}

impl DeviceConfig {
    /// Env values (already read) take precedence over the file section
    pub fn from_file(
        file: Option<FileDevice>,
        env_location: Option<String>,
        env_probe: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let file_location = match (file.latitude, file.longitude) {
            (Some(lat), Some(lng)) => Coordinates::parse(&format!("{},{}", lat, lng)),
            _ => None,
        };
        let location = env_location
            .as_deref()
            .and_then(|raw| {
                let parsed = Coordinates::parse(raw);
                if parsed.is_none() {
                    eprintln!("Ignoring invalid SAFEYATRA_LOCATION {:?} (expected \"lat,lng\")", raw);
                }
                parsed
            })
            .or(file_location);

        let connectivity_probe = env_probe
            .or(file.connectivity_probe)
            .filter(|p| !p.trim().is_empty());

        Self {
            location,
            connectivity_probe,
            probe_timeout_ms: file.probe_timeout_ms.unwrap_or(defaults.probe_timeout_ms),
        }
    }
}
