//! Insertion point resolution
//!
//! Given a document, a heading level and heading text, decide the line index
//! where a new entry belongs. Entries always go to the end of an existing
//! matching section. When the section is missing, the heading is created at
//! the place selected by `InsertPosition` and the index right after its
//! trailing blank line is returned.

use super::heading::HeadingLevel;
use super::section::{find_heading, find_heading_by_text, find_nth_heading, find_section_insert_point, is_blank};
use super::Boundary;
use crate::constants::FRONTMATTER_DELIMITER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Where a missing heading is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPosition {
    /// Before the first content line (after frontmatter)
    FileStart,
    /// At the end of the first section of the parent level
    FirstSection,
    /// At the end of the second section of the parent level
    SecondSection,
    /// At the end of the last section of the parent level
    #[default]
    LastSection,
    /// After the last content line of the document
    FileEnd,
}

impl InsertPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileStart => "file-start",
            Self::FirstSection => "first-section",
            Self::SecondSection => "second-section",
            Self::LastSection => "last-section",
            Self::FileEnd => "file-end",
        }
    }

    /// Parse a position, falling back to `FileEnd` for unknown values
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            warn!("{}, falling back to file-end", e);
            Self::FileEnd
        })
    }
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "file-start" => Ok(Self::FileStart),
            "first-section" => Ok(Self::FirstSection),
            "second-section" => Ok(Self::SecondSection),
            "last-section" => Ok(Self::LastSection),
            "file-end" => Ok(Self::FileEnd),
            other => Err(format!("unknown insert position '{}'", other)),
        }
    }
}

/// Insertion index relative to the whole document.
///
/// - `Start`: first content line after an optional `---` frontmatter block,
///   or the line right after the frontmatter when nothing follows it
/// - `End`: one past the last non-blank line, 0 when there is none
pub fn find_file_insert_point<S: AsRef<str>>(lines: &[S], boundary: Boundary) -> usize {
    if lines.is_empty() {
        return 0;
    }

    match boundary {
        Boundary::Start => {
            let position = frontmatter_end(lines).unwrap_or(0);
            (position..lines.len())
                .find(|&i| !is_blank(&lines[i]))
                .unwrap_or(position)
        }
        Boundary::End => lines
            .iter()
            .rposition(|line| !is_blank(line))
            .map_or(0, |last| last + 1),
    }
}

/// Index just past the closing `---` of a leading frontmatter block
fn frontmatter_end<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    if lines.first()?.as_ref() != FRONTMATTER_DELIMITER {
        return None;
    }
    lines
        .iter()
        .skip(1)
        .position(|line| line.as_ref() == FRONTMATTER_DELIMITER)
        .map(|offset| offset + 2)
}

/// Splice `heading_line` into `lines` at `index` with blank-line spacing.
///
/// At index 0 only a trailing blank line is added; elsewhere the heading is
/// wrapped in one blank line on each side. Returns the index right after the
/// trailing blank line.
pub fn insert_heading(lines: &mut Vec<String>, index: usize, heading_line: String) -> usize {
    let index = index.min(lines.len());
    let scaffold = if index == 0 {
        vec![heading_line, String::new()]
    } else {
        vec![String::new(), heading_line, String::new()]
    };
    let inserted = scaffold.len();
    lines.splice(index..index, scaffold);
    index + inserted
}

/// Resolve where a new entry belongs, creating the heading when missing.
///
/// An empty document yields 0 and is left untouched. An existing heading
/// (matched by level and normalized text) yields the end of its section,
/// whatever `position` says. Otherwise `lines` gains the heading.
pub fn resolve_insertion_point(
    lines: &mut Vec<String>,
    level: HeadingLevel,
    heading_text: &str,
    position: InsertPosition,
) -> usize {
    if lines.is_empty() {
        return 0;
    }

    if let Some(heading) = find_heading_by_text(lines.as_slice(), level, heading_text) {
        return find_section_insert_point(lines.as_slice(), heading, Boundary::End);
    }

    let anchor = heading_anchor(lines.as_slice(), level, position);
    debug!(
        "Creating heading '{} {}' at line {} ({})",
        level, heading_text, anchor, position
    );
    insert_heading(lines, anchor, level.heading_line(heading_text))
}

/// Line index where a missing heading is spliced in
fn heading_anchor<S: AsRef<str>>(lines: &[S], level: HeadingLevel, position: InsertPosition) -> usize {
    let parent = level.parent();
    let reference = match position {
        InsertPosition::FileStart => return find_file_insert_point(lines, Boundary::Start),
        InsertPosition::FileEnd => return find_file_insert_point(lines, Boundary::End),
        InsertPosition::FirstSection => find_nth_heading(lines, parent, 1),
        InsertPosition::SecondSection => find_nth_heading(lines, parent, 2),
        InsertPosition::LastSection => find_heading(lines, parent, true),
    };

    match reference {
        Some(heading) => find_section_insert_point(lines, heading, Boundary::End),
        None => find_file_insert_point(lines, Boundary::End),
    }
}
