//! 24-hour `HH:MM` time formatting

use chrono::{Local, Timelike};

/// Format a point in time as zero-padded `HH:MM`.
///
/// Uses the wall-clock hour and minute carried by `instant`; no timezone
/// conversion is performed.
pub fn format_time_24h<T: Timelike>(instant: &T) -> String {
    format!("{:02}:{:02}", instant.hour(), instant.minute())
}

/// Current local time as `HH:MM`
pub fn current_time_24h() -> String {
    format_time_24h(&Local::now())
}
