//! `/log` request handling
//!
//! Transport-agnostic: the handler only sees a query lookup and a response
//! sink. The HTTP listener in `server` adapts raw requests to these traits.

use crate::cache::DurableStore;
use crate::constants::LOG_QUERY_PARAM;
use crate::entry::LogSource;
use crate::journal::{Journal, LogEntryOptions};
use crate::notes::NoteSource;
use tracing::{debug, warn};

pub const NO_LOG_BODY: &str = "No Log";
pub const OK_BODY: &str = "OK";
pub const UNKNOWN_ERROR_BODY: &str = "Unknown error";

/// Read access to an inbound request
pub trait LogRequest {
    /// Decoded value of query parameter `name`
    fn query(&self, name: &str) -> Option<String>;
}

/// Response sink; status defaults to 200 until set
pub trait LogResponse {
    fn set_status(&mut self, status: u16);
    fn send(&mut self, body: &str);
}

/// Handle one `/log` request against `journal`.
///
/// - missing or empty `log` parameter: `No Log`
/// - entry written or cached: `OK`
/// - failure: status 500 with the failure message
pub fn handle_log_request<N, S>(
    journal: &mut Journal<N, S>,
    req: &impl LogRequest,
    res: &mut impl LogResponse,
) where
    N: NoteSource,
    S: DurableStore,
{
    let entry = match req.query(LOG_QUERY_PARAM) {
        Some(entry) if !entry.is_empty() => entry,
        _ => {
            debug!("Log request without entry");
            res.send(NO_LOG_BODY);
            return;
        }
    };

    let options = LogEntryOptions::with_source(LogSource::Api);
    let result = journal.add_log_entry(&entry, Some(&options));

    if result.success {
        res.send(OK_BODY);
    } else {
        let message = result.message.as_deref().unwrap_or(UNKNOWN_ERROR_BODY);
        warn!("Log request failed: {}", message);
        res.set_status(500);
        res.send(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryStore, PendingCache};
    use crate::error::Result;
    use crate::journal::LogSettings;
    use crate::notes::WriteOutcome;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    struct Query(HashMap<&'static str, &'static str>);

    impl LogRequest for Query {
        fn query(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|v| v.to_string())
        }
    }

    fn query(pairs: &[(&'static str, &'static str)]) -> Query {
        Query(pairs.iter().copied().collect())
    }

    #[derive(Default)]
    struct Captured {
        status: Option<u16>,
        body: Option<String>,
    }

    impl LogResponse for Captured {
        fn set_status(&mut self, status: u16) {
            self.status = Some(status);
        }

        fn send(&mut self, body: &str) {
            self.body = Some(body.to_string());
        }
    }

    struct Note {
        exists: bool,
        outcome: WriteOutcome,
        lines: Mutex<Vec<String>>,
    }

    impl NoteSource for Note {
        type Handle = ();

        fn current_note(&self) -> Option<()> {
            self.exists.then_some(())
        }

        fn read_lines(&self, _: &()) -> Result<Vec<String>> {
            Ok(self.lines.lock().clone())
        }

        fn write_lines(&self, _: &(), lines: &[String]) -> Result<WriteOutcome> {
            if self.outcome.success {
                *self.lines.lock() = lines.to_vec();
            }
            Ok(self.outcome.clone())
        }
    }

    fn journal(exists: bool, outcome: WriteOutcome) -> Journal<Note, MemoryStore> {
        let note = Note {
            exists,
            outcome,
            lines: Mutex::new(vec!["## Log Items".to_string()]),
        };
        let settings = LogSettings {
            manual_format: "manual {entry}".to_string(),
            ..LogSettings::default()
        };
        Journal::new(note, PendingCache::with_default_key(MemoryStore::new()), settings)
    }

    #[test]
    fn test_missing_log_param() {
        let mut journal = journal(true, WriteOutcome::ok());
        let mut res = Captured::default();

        handle_log_request(&mut journal, &query(&[("other", "x")]), &mut res);

        assert_eq!(res.body.as_deref(), Some("No Log"));
        assert_eq!(res.status, None);
        assert_eq!(journal.notes().lines.lock().len(), 1);
    }

    #[test]
    fn test_empty_log_param() {
        let mut journal = journal(true, WriteOutcome::ok());
        let mut res = Captured::default();
        handle_log_request(&mut journal, &query(&[("log", "")]), &mut res);
        assert_eq!(res.body.as_deref(), Some("No Log"));
    }

    #[test]
    fn test_success_uses_api_format() {
        let mut journal = journal(true, WriteOutcome::ok());
        let mut res = Captured::default();

        handle_log_request(&mut journal, &query(&[("log", "deployed")]), &mut res);

        assert_eq!(res.body.as_deref(), Some("OK"));
        assert_eq!(res.status, None);
        assert_eq!(
            *journal.notes().lines.lock(),
            vec!["## Log Items".to_string(), "- [x] deployed".to_string()]
        );
    }

    #[test]
    fn test_cached_entry_is_ok() {
        let mut journal = journal(false, WriteOutcome::ok());
        let mut res = Captured::default();

        handle_log_request(&mut journal, &query(&[("log", "later")]), &mut res);

        assert_eq!(res.body.as_deref(), Some("OK"));
        assert_eq!(journal.cache().get_entries(), Some("- [x] later".to_string()));
    }

    #[test]
    fn test_failure_is_500_with_message() {
        let mut journal = journal(true, WriteOutcome::failure("Permission denied"));
        let mut res = Captured::default();

        handle_log_request(&mut journal, &query(&[("log", "x")]), &mut res);

        assert_eq!(res.status, Some(500));
        assert_eq!(res.body.as_deref(), Some("Permission denied"));
    }

    #[test]
    fn test_failure_without_message() {
        let outcome = WriteOutcome {
            success: false,
            message: None,
        };
        let mut journal = journal(true, outcome);
        let mut res = Captured::default();

        handle_log_request(&mut journal, &query(&[("log", "x")]), &mut res);

        assert_eq!(res.status, Some(500));
        assert_eq!(res.body.as_deref(), Some("Unknown error"));
    }
}
