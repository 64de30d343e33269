//! Line-oriented Markdown helpers
//!
//! Locates headings and sections in a document held as a list of lines and
//! decides where new log lines belong:
//! - `heading` - Heading levels and text normalization
//! - `section` - Heading search and section boundaries
//! - `insertion` - Insertion point resolution (creates the heading if missing)
//!
//! No Markdown AST is built; a heading is any line starting with a run of `#`
//! followed by a space.

pub mod heading;
pub mod insertion;
pub mod section;

pub use heading::{normalize_heading_text, HeadingLevel};
pub use insertion::{find_file_insert_point, insert_heading, resolve_insertion_point, InsertPosition};
pub use section::{
    find_heading, find_heading_by_text, find_nth_heading, find_section_end,
    find_section_insert_point,
};

/// Which end of a section or file an insertion point is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}
