//! Heading search and section boundaries
//!
//! A section runs from its heading line up to (not including) the next line
//! that starts with `#`, or to the end of the document. All functions are
//! pure scans over the line slice.

use super::heading::{normalize_heading_text, HeadingLevel};
use super::Boundary;

/// Find the first (or last, when `find_last`) heading of `level`
pub fn find_heading<S: AsRef<str>>(lines: &[S], level: HeadingLevel, find_last: bool) -> Option<usize> {
    let mut headings = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| level.matches(line.as_ref()))
        .map(|(i, _)| i);

    if find_last {
        headings.last()
    } else {
        headings.next()
    }
}

/// Find the `n`th heading of `level`, counting from 1
pub fn find_nth_heading<S: AsRef<str>>(lines: &[S], level: HeadingLevel, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| level.matches(line.as_ref()))
        .map(|(i, _)| i)
        .nth(n - 1)
}

/// Find the first heading of `level` whose normalized text equals the
/// normalized `text`
pub fn find_heading_by_text<S: AsRef<str>>(lines: &[S], level: HeadingLevel, text: &str) -> Option<usize> {
    let wanted = normalize_heading_text(text);
    lines.iter().position(|line| {
        level
            .text_of(line.as_ref())
            .is_some_and(|found| normalize_heading_text(found) == wanted)
    })
}

/// Last line index belonging to the section that starts at `start`.
///
/// Returns `start` itself when the next line is already a heading.
pub fn find_section_end<S: AsRef<str>>(lines: &[S], start: usize) -> usize {
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        if line.as_ref().starts_with('#') {
            return i - 1;
        }
    }
    lines.len().saturating_sub(1).max(start)
}

/// Insertion index inside the section headed at `heading`.
///
/// - `Start`: first non-blank line after the heading, or `heading + 1` when
///   the section holds only blank lines
/// - `End`: one past the last non-blank line, or `heading + 1` when the
///   section has no content
pub fn find_section_insert_point<S: AsRef<str>>(lines: &[S], heading: usize, boundary: Boundary) -> usize {
    let end = find_section_end(lines, heading);

    match boundary {
        Boundary::Start => (heading + 1..=end)
            .take_while(|&i| i < lines.len())
            .find(|&i| !is_blank(&lines[i]))
            .unwrap_or(heading + 1),
        Boundary::End => {
            let last = (heading + 1..=end)
                .take_while(|&i| i < lines.len())
                .filter(|&i| !is_blank(&lines[i]))
                .last()
                .unwrap_or(heading);
            last + 1
        }
    }
}

#[inline]
pub(crate) fn is_blank<S: AsRef<str>>(line: &S) -> bool {
    line.as_ref().trim().is_empty()
}
