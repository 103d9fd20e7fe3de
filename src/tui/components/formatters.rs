// Display formatters shared by the views

use chrono::{DateTime, Utc};

/// Format a large number with commas for readability
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(45678), "45,678");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }

    result
}

/// "just now", "1 min ago", "5 min ago", "2 h ago"
pub fn format_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);
    match minutes {
        0 => "just now".to_string(),
        1..=59 => format!("{} min ago", minutes),
        _ => format!("{} h ago", minutes / 60),
    }
}

/// Ten-cell battery gauge, e.g. "████████░░ 85%"
pub fn battery_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = (percent as usize + 5) / 10;
    format!("{}{} {}%", "█".repeat(filled), "░".repeat(10 - filled), percent)
}
