//! Log entry formatting
//!
//! Expands a template into the literal line written to the note:
//! - `{currentTime}` - current `HH:MM` (every occurrence)
//! - `{lastEntryTime}` - previous entry's `HH:MM`, or `--:--` (every occurrence)
//! - `{entry}` - raw entry text (first occurrence only)

use crate::constants::{
    CURRENT_TIME_PLACEHOLDER, ENTRY_PLACEHOLDER, LAST_ENTRY_TIME_PLACEHOLDER,
    MISSING_TIME,
};
use crate::time::format_time_24h;
use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Origin of a log entry; selects the template used to format it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    /// Programmatic callers (HTTP endpoint)
    #[default]
    Api,
    /// Entries typed in by hand
    Manual,
}

/// Format `entry` with `template`, using the current local time
pub fn format_log_entry(entry: &str, template: &str, last_entry_time: Option<&DateTime<Local>>) -> String {
    format_log_entry_at(entry, template, last_entry_time, &Local::now())
}

/// Format `entry` with `template`, treating `now` as the current time
pub fn format_log_entry_at<T: Timelike>(
    entry: &str,
    template: &str,
    last_entry_time: Option<&DateTime<Local>>,
    now: &T,
) -> String {
    let mut line = template.to_string();

    if line.contains(CURRENT_TIME_PLACEHOLDER) {
        line = line.replace(CURRENT_TIME_PLACEHOLDER, &format_time_24h(now));
    }

    if line.contains(LAST_ENTRY_TIME_PLACEHOLDER) {
        let last = last_entry_time
            .map(format_time_24h)
            .unwrap_or_else(|| MISSING_TIME.to_string());
        line = line.replace(LAST_ENTRY_TIME_PLACEHOLDER, &last);
    }

    // Only the first {entry} is substituted
    line.replacen(ENTRY_PLACEHOLDER, entry, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};
    use proptest::prelude::*;

    fn local(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, h, m, 0).single().unwrap()
    }

    fn clock(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_replaces_entry() {
        assert_eq!(
            format_log_entry("Did something", "- [x] {entry}", None),
            "- [x] Did something"
        );
        assert_eq!(format_log_entry("Do it", "- Task: {entry}", None), "- Task: Do it");
    }

    #[test]
    fn test_current_time() {
        let line = format_log_entry_at("Task", "- {currentTime} {entry}", None, &clock(9, 5));
        assert_eq!(line, "- 09:05 Task");
    }

    #[test]
    fn test_current_time_uses_clock_shape() {
        let line = format_log_entry("Task", "- {currentTime} {entry}", None);
        assert!(line.starts_with("- "));
        assert!(line.ends_with(" Task"));
        assert_eq!(line.len(), "- HH:MM Task".len());
    }

    #[test]
    fn test_last_entry_time_present() {
        let last = local(14, 0);
        let line = format_log_entry_at(
            "Task",
            "{lastEntryTime}-{currentTime} {entry}",
            Some(&last),
            &clock(15, 30),
        );
        assert_eq!(line, "14:00-15:30 Task");
    }

    #[test]
    fn test_last_entry_time_missing() {
        let line = format_log_entry_at("Task", "{lastEntryTime}-{currentTime} {entry}", None, &clock(8, 1));
        assert_eq!(line, "--:---08:01 Task");
    }

    #[test]
    fn test_only_first_entry_replaced() {
        assert_eq!(format_log_entry("Text", "{entry} ({entry})", None), "Text ({entry})");
    }

    #[test]
    fn test_entry_text_is_not_expanded() {
        let line = format_log_entry_at("{currentTime}", "- {entry}", None, &clock(10, 0));
        assert_eq!(line, "- {currentTime}");
    }

    #[test]
    fn test_log_source_serde() {
        assert_eq!(serde_json::to_string(&LogSource::Manual).unwrap(), "\"manual\"");
        let parsed: LogSource = serde_json::from_str("\"api\"").unwrap();
        assert_eq!(parsed, LogSource::Api);
    }

    proptest! {
        #[test]
        fn prop_first_entry_only(
            entry in "[a-z ]{0,12}",
            prefix in "[a-z -]{0,6}",
            middle in "[a-z -]{0,6}",
        ) {
            let template = format!("{}{{entry}}{}{{entry}}", prefix, middle);
            let line = format_log_entry(&entry, &template, None);
            prop_assert_eq!(line, format!("{}{}{}{{entry}}", prefix, entry, middle));
        }
    }
}
