//! Configuration tests
//!
//! Round-trips guard against fields that are added to `Config` but not to
//! the template (or vice versa).

use super::*;
use crate::signals::Coordinates;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let config = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(config.theme, "saffron");
    assert_eq!(config.language, Language::En);
    assert_eq!(config.timing, TimingConfig::default());
    assert_eq!(config.device, DeviceConfig::default());
    assert_eq!(config.logging, LoggingConfig::default());
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_roundtrip_with_device() {
    let mut config = Config::default();
    config.language = Language::Mr;
    config.device.location = Some(Coordinates {
        lat: 19.9975,
        lng: 73.7898,
    });
    config.device.connectivity_probe = Some("127.0.0.1:9".to_string());
    config.timing.sos_duration_secs = 4;
    config.logging.file = Some(LogFile {
        rotation: LogRotation::Hourly,
        ..LogFile::default()
    });

    let toml_str = config.to_toml();
    let parsed = Config::parse_file_config(&toml_str).expect("should parse");
    let loaded = Config::resolve(parsed, no_env);

    assert_eq!(loaded.language, Language::Mr);
    assert_eq!(loaded.device, config.device);
    assert_eq!(loaded.timing.sos_duration_secs, 4);
    assert_eq!(loaded.logging, config.logging);
}

#[test]
fn test_quotes_in_strings_survive_roundtrip() {
    let mut config = Config::default();
    config.theme = r#"night" # not a comment"#.to_string();
    config.device.connectivity_probe = Some("probe\"host:53".to_string());
    config.logging.file = Some(LogFile {
        dir: "C:\\logs\\yatra".into(),
        prefix: "audit \"pilgrims\"".to_string(),
        rotation: LogRotation::Never,
    });

    let toml_str = config.to_toml();
    let parsed = Config::parse_file_config(&toml_str);
    assert!(parsed.is_ok(), "TOML:\n{}\nError: {:?}", toml_str, parsed.err());
    let loaded = Config::resolve(parsed.unwrap(), no_env);

    assert_eq!(loaded.theme, config.theme);
    assert_eq!(loaded.device.connectivity_probe, config.device.connectivity_probe);
    let file = loaded.logging.file.expect("file logging stays on");
    assert_eq!(file.prefix, "audit \"pilgrims\"");
    assert_eq!(file.dir, std::path::PathBuf::from("C:/logs/yatra"));
    assert_eq!(file.rotation, LogRotation::Never);
}

#[test]
fn test_log_file_table_enables_file_logging() {
    let file = Config::parse_file_config("[logging]\nlevel = \"debug\"\n").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.file.is_none());

    let file = Config::parse_file_config("[logging.file]\nrotation = \"hourly\"\n").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.logging.level, "info");
    assert_eq!(
        config.logging.file,
        Some(LogFile {
            rotation: LogRotation::Hourly,
            ..LogFile::default()
        })
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config(
        r#"
theme = "night"
language = "hi"

[device]
latitude = 10.0
longitude = 20.0
"#,
    )
    .unwrap();

    let config = Config::resolve(
        file,
        env_of(&[
            ("SAFEYATRA_THEME", "auto"),
            ("SAFEYATRA_LOCATION", "23.18,75.79"),
            ("SAFEYATRA_PROBE", "example.org:443"),
        ]),
    );

    assert_eq!(config.theme, "auto");
    assert_eq!(config.language, Language::Hi);
    assert_eq!(
        config.device.location,
        Some(Coordinates {
            lat: 23.18,
            lng: 75.79
        })
    );
    assert_eq!(config.device.connectivity_probe.as_deref(), Some("example.org:443"));
}

#[test]
fn test_invalid_env_location_falls_back_to_file() {
    let file = Config::parse_file_config("[device]\nlatitude = 1.5\nlongitude = 2.5\n").unwrap();
    let config = Config::resolve(file, env_of(&[("SAFEYATRA_LOCATION", "nowhere")]));

    assert_eq!(config.device.location, Some(Coordinates { lat: 1.5, lng: 2.5 }));
}

#[test]
fn test_partial_device_section_has_no_location() {
    let file = Config::parse_file_config("[device]\nlatitude = 1.5\n").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.device.location, None);
}

#[test]
fn test_no_tui_flag() {
    let config = Config::resolve(FileConfig::default(), env_of(&[("SAFEYATRA_NO_TUI", "1")]));
    assert!(!config.enable_tui);

    let config = Config::resolve(FileConfig::default(), env_of(&[("SAFEYATRA_NO_TUI", "0")]));
    assert!(config.enable_tui);
}

#[test]
fn test_unknown_language_uses_default() {
    let config = Config::resolve(FileConfig::default(), env_of(&[("SAFEYATRA_LANGUAGE", "fr")]));
    assert_eq!(config.language, Language::En);
}

#[test]
fn test_unknown_env_language_falls_back_to_file() {
    let file = Config::parse_file_config("language = \"hi\"\n").unwrap();
    let config = Config::resolve(file, env_of(&[("SAFEYATRA_LANGUAGE", "fr")]));
    assert_eq!(config.language, Language::Hi);

    let file = Config::parse_file_config("language = \"hi\"\n").unwrap();
    let config = Config::resolve(file, env_of(&[("SAFEYATRA_LANGUAGE", "marathi")]));
    assert_eq!(config.language, Language::Mr);
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(Config::parse_file_config("theme = saffron").is_err());
    assert!(Config::parse_file_config("[timing]\ntoast_secs = \"three\"").is_err());
    assert!(Config::parse_file_config("[logging.file]\nrotation = \"weekly\"").is_err());
}

#[test]
fn test_toast_secs_has_floor() {
    let file = Config::parse_file_config("[timing]\ntoast_secs = 0\n").unwrap();
    assert_eq!(Config::resolve(file, no_env).timing.toast_secs, 1);
}
