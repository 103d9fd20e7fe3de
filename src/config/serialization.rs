//! Config serialization to TOML
//!
//! Single source of truth for the config file format.

use super::Config;

/// Quote and escape a string as a TOML basic string
fn toml_str(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize `[device]`, commenting out unset keys
    fn device_to_toml(&self) -> String {
        let mut output = String::from("[device]\n");
        match self.device.location {
            Some(location) => {
                output.push_str(&format!("latitude = {}\n", location.lat));
                output.push_str(&format!("longitude = {}\n", location.lng));
            }
            None => {
                output.push_str("# latitude = 23.1765\n");
                output.push_str("# longitude = 75.7885\n");
            }
        }
        match &self.device.connectivity_probe {
            Some(probe) => output.push_str(&format!("connectivity_probe = {}\n", toml_str(probe))),
            None => output.push_str("# connectivity_probe = \"1.1.1.1:53\"\n"),
        }
        output.push_str(&format!("probe_timeout_ms = {}\n", self.device.probe_timeout_ms));
        output
    }

    /// Serialize `[logging.file]`, commented out when file logging is off
    fn log_file_to_toml(&self) -> String {
        match &self.logging.file {
            Some(file) => format!(
                "[logging.file]\ndir = {}\nprefix = {}\nrotation = \"{}\"  # hourly, daily, never\n",
                toml_str(&file.dir.display().to_string().replace('\\', "/")),
                toml_str(&file.prefix),
                file.rotation.as_str(),
            ),
            None => String::from(
                "# [logging.file]\n# dir = \"./logs\"\n# prefix = \"safeyatra\"\n# rotation = \"daily\"  # hourly, daily, never\n",
            ),
        }
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# safeyatra configuration

# Theme: saffron, night, auto
theme = {theme}

# Initial login form language: en, hi, mr
language = "{language}"

# Simulated latencies and transient UI lifetimes
[timing]
send_code_delay_ms = {send_delay}
verify_delay_ms = {verify_delay}
sos_duration_secs = {sos}
toast_secs = {toast}

# Location and connectivity (SAFEYATRA_LOCATION / SAFEYATRA_PROBE override)
# Without a location the demo coordinates are used; without a probe the
# device is always reported online.
{device}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}

# JSON file logging (in addition to the activity panel or stdout)
{log_file}"#,
            theme = toml_str(&self.theme),
            language = self.language.code(),
            send_delay = self.timing.send_code_delay_ms,
            verify_delay = self.timing.verify_delay_ms,
            sos = self.timing.sos_duration_secs,
            toast = self.timing.toast_secs,
            device = self.device_to_toml(),
            log_level = toml_str(&self.logging.level),
            log_file = self.log_file_to_toml(),
        )
    }
}
