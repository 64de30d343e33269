//! Daily note access
//!
//! `NoteSource` is the document collaborator used by the journal: it locates
//! today's note and moves it in and out of memory as a list of lines.
//! `DailyNotes` implements it over a directory of `<date>.<ext>` files.

use crate::constants::{DEFAULT_DATE_FORMAT, DEFAULT_NOTE_EXTENSION};
use crate::error::{DaylogError, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of writing a note back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl WriteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Source of the current daily note.
///
/// `write_lines` reports ordinary write failures through `WriteOutcome`;
/// `Err` is reserved for failures the source could not classify.
pub trait NoteSource {
    type Handle;

    /// Today's note, `None` when it does not exist yet
    fn current_note(&self) -> Option<Self::Handle>;

    fn read_lines(&self, note: &Self::Handle) -> Result<Vec<String>>;

    fn write_lines(&self, note: &Self::Handle, lines: &[String]) -> Result<WriteOutcome>;
}

/// Daily notes stored as `<dir>/<date_format>.<extension>`
#[derive(Debug, Clone)]
pub struct DailyNotes {
    dir: PathBuf,
    date_format: String,
    extension: String,
}

impl DailyNotes {
    pub fn new(dir: impl Into<PathBuf>, date_format: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            date_format: date_format.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Notes in `dir` named `%Y-%m-%d.md`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DEFAULT_DATE_FORMAT, DEFAULT_NOTE_EXTENSION)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the note for `date`, whether or not it exists
    pub fn note_path_for(&self, date: NaiveDate) -> PathBuf {
        let stem = date.format(&self.date_format).to_string();
        if self.extension.is_empty() {
            self.dir.join(stem)
        } else {
            self.dir.join(format!("{}.{}", stem, self.extension))
        }
    }

    pub fn today_path(&self) -> PathBuf {
        self.note_path_for(Local::now().date_naive())
    }
}

impl NoteSource for DailyNotes {
    type Handle = PathBuf;

    fn current_note(&self) -> Option<PathBuf> {
        let path = self.today_path();
        if path.is_file() {
            Some(path)
        } else {
            debug!("No daily note at {:?}", path);
            None
        }
    }

    fn read_lines(&self, note: &PathBuf) -> Result<Vec<String>> {
        let content = fs::read_to_string(note).map_err(|e| DaylogError::Io {
            path: note.clone(),
            source: e,
        })?;
        Ok(content.split('\n').map(str::to_string).collect())
    }

    fn write_lines(&self, note: &PathBuf, lines: &[String]) -> Result<WriteOutcome> {
        match fs::write(note, lines.join("\n")) {
            Ok(()) => Ok(WriteOutcome::ok()),
            Err(e) => Ok(WriteOutcome::failure(format!("Failed to write to file: {}", e))),
        }
    }
}
