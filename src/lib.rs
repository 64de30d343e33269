//! daylog - append log entries under a heading of today's Markdown daily note
//!
//! Entries are formatted from a template, filed at the end of a named section
//! (created on demand) and cached while today's note does not exist yet.

pub mod cache;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod entry;
pub mod error;
pub mod journal;
pub mod logging;
pub mod markdown;
pub mod notes;
pub mod server;
pub mod time;

pub use cache::{DurableStore, JsonFileStore, MemoryStore, PendingCache};
pub use entry::{format_log_entry, LogSource};
pub use error::{DaylogError, Result};
pub use journal::{Journal, LogEntryOptions, LogResult, LogSettings};
pub use markdown::{HeadingLevel, InsertPosition};
pub use notes::{DailyNotes, NoteSource, WriteOutcome};
