//! Application-wide constants
//!
//! Centralized defaults shared by config, formatting and the cache.

// =============================================================================
// Templates
// =============================================================================

/// Default template for entries arriving through the HTTP endpoint
pub const DEFAULT_ENTRY_FORMAT: &str = "- [x] {entry}";

/// Default template for entries typed in by hand
pub const DEFAULT_MANUAL_ENTRY_FORMAT: &str = "- {currentTime} {entry}";

/// Placeholder substituted with the raw entry text (first occurrence only)
pub const ENTRY_PLACEHOLDER: &str = "{entry}";

/// Placeholder substituted with the current `HH:MM`
pub const CURRENT_TIME_PLACEHOLDER: &str = "{currentTime}";

/// Placeholder substituted with the previous entry's `HH:MM`
pub const LAST_ENTRY_TIME_PLACEHOLDER: &str = "{lastEntryTime}";

/// Rendered in place of `{lastEntryTime}` when no previous entry is known
pub const MISSING_TIME: &str = "--:--";

// =============================================================================
// Headings
// =============================================================================

/// Default heading text entries are filed under
pub const DEFAULT_HEADING_TEXT: &str = "Log Items";

/// Characters stripped from the end of heading text before comparison
pub const HEADING_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// YAML frontmatter delimiter line
pub const FRONTMATTER_DELIMITER: &str = "---";

// =============================================================================
// Cache
// =============================================================================

/// Default key for the pending-entry backlog
pub const DEFAULT_CACHE_KEY: &str = "journalLogCache";

/// Suffix appended to the cache key for the last-entry timestamp
pub const LAST_ENTRY_TIME_SUFFIX: &str = "_lastEntryTime";

/// Message returned when an entry is parked in the cache
pub const CACHED_MESSAGE: &str = "Entry cached for later processing";

/// Prefix for orchestrator failures caused by an error
pub const FAILURE_PREFIX: &str = "Failed to add log entry: ";

// =============================================================================
// Notes
// =============================================================================

/// Default daily note file name pattern (chrono strftime)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default daily note extension
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

// =============================================================================
// Server
// =============================================================================

/// Default localhost port for the `/log` endpoint
pub const DEFAULT_HTTP_PORT: u16 = 27125;

/// Route served by the HTTP listener
pub const LOG_ROUTE: &str = "/log";

/// Query parameter carrying the entry text
pub const LOG_QUERY_PARAM: &str = "log";

/// Request poll interval used to observe shutdown (milliseconds)
pub const RECV_POLL_MS: u64 = 250;
