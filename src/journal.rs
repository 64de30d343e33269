//! Log orchestration
//!
//! `Journal` ties the pieces together for a single entry:
//!
//! ```text
//! raw text ─► format ─► today's note? ──no──► pending cache
//!                           │ yes
//!                           ▼
//!             backlog + entry ─► insertion point ─► write ─► clear backlog
//! ```
//!
//! Errors never escape `add_log_entry`; they are folded into `LogResult`.
//! Calls must be serialized by the owner (`&mut self`).

use crate::cache::{DurableStore, PendingCache};
use crate::constants::{
    CACHED_MESSAGE, DEFAULT_ENTRY_FORMAT, DEFAULT_HEADING_TEXT, DEFAULT_MANUAL_ENTRY_FORMAT,
    FAILURE_PREFIX,
};
use crate::entry::{format_log_entry, LogSource};
use crate::error::Result;
use crate::markdown::{resolve_insertion_point, HeadingLevel, InsertPosition};
use crate::notes::{NoteSource, WriteOutcome};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Logging defaults applied to every entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Template for api entries
    pub format: String,
    /// Template for manual entries
    pub manual_format: String,
    pub heading_level: HeadingLevel,
    pub heading_text: String,
    pub insert_position: InsertPosition,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_ENTRY_FORMAT.to_string(),
            manual_format: DEFAULT_MANUAL_ENTRY_FORMAT.to_string(),
            heading_level: HeadingLevel::default(),
            heading_text: DEFAULT_HEADING_TEXT.to_string(),
            insert_position: InsertPosition::default(),
        }
    }
}

impl LogSettings {
    /// Copy of these settings with every `Some` field of `options` applied
    pub fn merged(&self, options: &LogEntryOptions) -> Self {
        let mut merged = self.clone();
        merged.apply(options);
        merged
    }

    fn apply(&mut self, options: &LogEntryOptions) {
        if let Some(format) = &options.format {
            self.format = format.clone();
        }
        if let Some(format) = &options.manual_format {
            self.manual_format = format.clone();
        }
        if let Some(level) = options.heading_level {
            self.heading_level = level;
        }
        if let Some(text) = &options.heading_text {
            self.heading_text = text.clone();
        }
        if let Some(position) = options.insert_position {
            self.insert_position = position;
        }
    }

    fn template_for(&self, source: LogSource) -> &str {
        match source {
            LogSource::Manual => &self.manual_format,
            LogSource::Api => &self.format,
        }
    }
}

/// Per-call overrides; `None` keeps the stored setting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntryOptions {
    pub format: Option<String>,
    pub manual_format: Option<String>,
    pub heading_level: Option<HeadingLevel>,
    pub heading_text: Option<String>,
    pub insert_position: Option<InsertPosition>,
    pub source: Option<LogSource>,
}

impl LogEntryOptions {
    pub fn with_source(source: LogSource) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }
}

/// Outcome of one `add_log_entry` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogResult {
    pub success: bool,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LogResult {
    pub fn cached() -> Self {
        Self {
            success: true,
            cached: true,
            message: Some(CACHED_MESSAGE.to_string()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            cached: false,
            message: Some(message.into()),
        }
    }
}

impl From<WriteOutcome> for LogResult {
    fn from(outcome: WriteOutcome) -> Self {
        Self {
            success: outcome.success,
            cached: false,
            message: outcome.message,
        }
    }
}

/// Appends entries to today's note, deferring them while it is missing
pub struct Journal<N, S> {
    notes: N,
    cache: PendingCache<S>,
    settings: LogSettings,
}

impl<N: NoteSource, S: DurableStore> Journal<N, S> {
    pub fn new(notes: N, cache: PendingCache<S>, settings: LogSettings) -> Self {
        Self {
            notes,
            cache,
            settings,
        }
    }

    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    pub fn cache(&self) -> &PendingCache<S> {
        &self.cache
    }

    pub fn notes(&self) -> &N {
        &self.notes
    }

    /// Merge `options` into the stored settings (`source` is ignored)
    pub fn update_options(&mut self, options: &LogEntryOptions) {
        self.settings.apply(options);
    }

    pub fn set_manual_entry_format(&mut self, template: impl Into<String>) {
        self.settings.manual_format = template.into();
    }

    /// Add one entry to today's note, or cache it when the note is missing
    pub fn add_log_entry(&mut self, raw: &str, options: Option<&LogEntryOptions>) -> LogResult {
        let settings = match options {
            Some(options) => self.settings.merged(options),
            None => self.settings.clone(),
        };
        let source = options.and_then(|o| o.source).unwrap_or_default();

        let last_entry_time = self.cache.get_last_entry_time();
        if let Err(e) = self.cache.update_last_entry_time() {
            warn!("Failed to record last entry time: {}", e);
        }

        let formatted = format_log_entry(raw, settings.template_for(source), last_entry_time.as_ref());

        let Some(note) = self.notes.current_note() else {
            return self.defer(&formatted);
        };

        match self.write_entry(&note, &settings, formatted) {
            Ok(outcome) if outcome.success => {
                if let Err(e) = self.cache.clear_entries() {
                    warn!("Entry written but pending cache not cleared: {}", e);
                }
                outcome.into()
            }
            Ok(outcome) => {
                warn!(
                    "Note write failed: {}",
                    outcome.message.as_deref().unwrap_or("no message")
                );
                outcome.into()
            }
            Err(e) => {
                warn!("Failed to add log entry: {}", e);
                LogResult::failure(format!("{}{}", FAILURE_PREFIX, e))
            }
        }
    }

    fn defer(&self, formatted: &str) -> LogResult {
        match self.cache.add_entry(formatted) {
            Ok(()) => {
                info!("No daily note yet, entry cached");
                LogResult::cached()
            }
            Err(e) => LogResult::failure(format!("{}{}", FAILURE_PREFIX, e)),
        }
    }

    fn write_entry(&self, note: &N::Handle, settings: &LogSettings, formatted: String) -> Result<WriteOutcome> {
        let text = match self.cache.get_entries() {
            Some(backlog) if !backlog.is_empty() => {
                debug!("Flushing pending entries ahead of new entry");
                format!("{}\n{}", backlog, formatted)
            }
            _ => formatted,
        };

        let mut lines = self.notes.read_lines(note)?;
        let index = resolve_insertion_point(
            &mut lines,
            settings.heading_level,
            &settings.heading_text,
            settings.insert_position,
        );
        lines.insert(index.min(lines.len()), text);

        self.notes.write_lines(note, &lines)
    }
}
