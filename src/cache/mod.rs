//! Pending-entry cache
//!
//! Holds formatted entries while today's note does not exist yet, plus the
//! timestamp of the most recent entry. Both live in a `DurableStore`:
//! - `<key>` - newline-joined backlog
//! - `<key>_lastEntryTime` - RFC 3339 timestamp
//!
//! Single-writer: concurrent callers may read the same backlog.

pub mod store;

pub use store::{DurableStore, JsonFileStore, MemoryStore};

use crate::constants::{DEFAULT_CACHE_KEY, LAST_ENTRY_TIME_SUFFIX};
use crate::error::Result;
use chrono::{DateTime, Local};
use tracing::{debug, warn};

pub struct PendingCache<S> {
    store: S,
    key: String,
    time_key: String,
}

impl<S: DurableStore> PendingCache<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let time_key = format!("{}{}", key, LAST_ENTRY_TIME_SUFFIX);
        Self { store, key, time_key }
    }

    /// Cache using the default `journalLogCache` key
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_CACHE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored backlog, `None` when nothing was ever cached or it was cleared
    pub fn get_entries(&self) -> Option<String> {
        self.store.get(&self.key)
    }

    /// Append one formatted entry to the backlog
    pub fn add_entry(&self, entry: &str) -> Result<()> {
        let value = match self.get_entries() {
            Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, entry),
            _ => entry.to_string(),
        };
        self.store.set(&self.key, &value)?;
        debug!("Cached entry under '{}'", self.key);
        Ok(())
    }

    /// Drop the backlog entirely (absent, not empty)
    pub fn clear_entries(&self) -> Result<()> {
        self.store.remove(&self.key)
    }

    /// Whether the backlog holds anything besides whitespace
    pub fn has_entries(&self) -> bool {
        self.get_entries().is_some_and(|e| !e.trim().is_empty())
    }

    /// Record "now" as the last entry time
    pub fn update_last_entry_time(&self) -> Result<()> {
        self.update_last_entry_time_at(Local::now())
    }

    pub fn update_last_entry_time_at(&self, at: DateTime<Local>) -> Result<()> {
        self.store.set(&self.time_key, &at.to_rfc3339())
    }

    /// Last recorded entry time; unparsable values are logged and ignored
    pub fn get_last_entry_time(&self) -> Option<DateTime<Local>> {
        let raw = self.store.get(&self.time_key)?;
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(t) => Some(t.with_timezone(&Local)),
            Err(e) => {
                warn!("Ignoring invalid last entry time '{}': {}", raw, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn cache() -> PendingCache<MemoryStore> {
        PendingCache::new(MemoryStore::new(), "testCache")
    }

    #[test]
    fn test_empty_cache() {
        let cache = cache();
        assert_eq!(cache.get_entries(), None);
        assert!(!cache.has_entries());
        assert_eq!(cache.get_last_entry_time(), None);
    }

    #[test]
    fn test_first_entry_has_no_separator() {
        let cache = cache();
        cache.add_entry("First entry").unwrap();
        assert_eq!(cache.store().get("testCache"), Some("First entry".to_string()));
    }

    #[test]
    fn test_entries_are_newline_joined_in_order() {
        let cache = cache();
        cache.add_entry("First").unwrap();
        cache.add_entry("Second").unwrap();
        cache.add_entry("Third").unwrap();
        assert_eq!(cache.get_entries(), Some("First\nSecond\nThird".to_string()));
    }

    #[test]
    fn test_clear_removes_key() {
        let cache = cache();
        cache.add_entry("a").unwrap();
        cache.add_entry("b").unwrap();
        assert_eq!(cache.get_entries(), Some("a\nb".to_string()));

        cache.clear_entries().unwrap();
        assert_eq!(cache.get_entries(), None);
        assert!(!cache.has_entries());
    }

    #[test]
    fn test_whitespace_is_not_an_entry() {
        let cache = cache();
        cache.store().set("testCache", "").unwrap();
        assert!(!cache.has_entries());
        cache.store().set("testCache", "  \n\t ").unwrap();
        assert!(!cache.has_entries());
        cache.store().set("testCache", "entry").unwrap();
        assert!(cache.has_entries());
    }

    #[test]
    fn test_last_entry_time_roundtrip() {
        let cache = cache();
        let at = Local.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).single().unwrap();
        cache.update_last_entry_time_at(at).unwrap();

        assert!(cache.store().get("testCache_lastEntryTime").is_some());
        assert_eq!(cache.get_last_entry_time(), Some(at));
    }

    #[test]
    fn test_last_entry_time_overwrites() {
        let cache = cache();
        let first = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap();
        cache.update_last_entry_time_at(first).unwrap();
        cache.update_last_entry_time().unwrap();

        let latest = cache.get_last_entry_time().unwrap();
        assert!(latest > first);
        assert!(Local::now() - latest < Duration::minutes(1));
    }

    #[test]
    fn test_invalid_last_entry_time_is_ignored() {
        let cache = cache();
        cache.store().set("testCache_lastEntryTime", "yesterday").unwrap();
        assert_eq!(cache.get_last_entry_time(), None);
    }

    #[test]
    fn test_default_key() {
        let cache = PendingCache::with_default_key(MemoryStore::new());
        cache.add_entry("Test").unwrap();
        assert_eq!(cache.store().get("journalLogCache"), Some("Test".to_string()));
        cache.update_last_entry_time().unwrap();
        assert!(cache.store().get("journalLogCache_lastEntryTime").is_some());
    }

    #[test]
    fn test_full_lifecycle() {
        let cache = cache();
        assert!(!cache.has_entries());
        cache.add_entry("Entry 1").unwrap();
        assert!(cache.has_entries());
        cache.add_entry("Entry 2").unwrap();
        assert_eq!(cache.get_entries(), Some("Entry 1\nEntry 2".to_string()));
        cache.clear_entries().unwrap();
        assert!(!cache.has_entries());
        assert_eq!(cache.get_entries(), None);
    }
}
