//! Heading levels and heading-text normalization

use crate::constants::HEADING_TRAILING_PUNCTUATION;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Markdown ATX heading level, written as a run of `#` characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HeadingLevel {
    #[serde(rename = "#")]
    H1,
    #[default]
    #[serde(rename = "##")]
    H2,
    #[serde(rename = "###")]
    H3,
    #[serde(rename = "####")]
    H4,
}

impl HeadingLevel {
    /// The `#` run that introduces a heading of this level
    pub fn marker(self) -> &'static str {
        match self {
            Self::H1 => "#",
            Self::H2 => "##",
            Self::H3 => "###",
            Self::H4 => "####",
        }
    }

    /// Level whose sections host a newly created heading of this level.
    ///
    /// `#` and `##` are placed among siblings; deeper levels go inside the
    /// section one level up.
    pub fn parent(self) -> Self {
        match self {
            Self::H1 | Self::H2 => self,
            Self::H3 => Self::H2,
            Self::H4 => Self::H3,
        }
    }

    /// Whether `line` is a heading of exactly this level
    pub fn matches(self, line: &str) -> bool {
        line.strip_prefix(self.marker())
            .is_some_and(|rest| rest.starts_with(' '))
    }

    /// Heading text following `marker + " "`, if `line` is a heading of this level
    pub fn text_of(self, line: &str) -> Option<&str> {
        line.strip_prefix(self.marker())?.strip_prefix(' ')
    }

    /// Render a heading line of this level
    pub fn heading_line(self, text: &str) -> String {
        format!("{} {}", self.marker(), text)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "#" | "1" => Ok(Self::H1),
            "##" | "2" => Ok(Self::H2),
            "###" | "3" => Ok(Self::H3),
            "####" | "4" => Ok(Self::H4),
            other => Err(format!("unsupported heading level '{}'", other)),
        }
    }
}

/// Normalize heading text for comparison.
///
/// Trims surrounding whitespace, strips any trailing run of `. , ; : ! ?`
/// and lowercases the result.
pub fn normalize_heading_text(text: &str) -> String {
    text.trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || HEADING_TRAILING_PUNCTUATION.contains(&c))
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_heading_text("  Log Items  "), "log items");
        assert_eq!(normalize_heading_text("Simple Text"), "simple text");
    }

    #[test]
    fn test_normalize_strips_trailing_punctuation() {
        assert_eq!(normalize_heading_text("Activity Log:"), "activity log");
        assert_eq!(normalize_heading_text("Done Today!"), "done today");
        assert_eq!(normalize_heading_text("Notes..."), "notes");
        assert_eq!(normalize_heading_text("What?!?"), "what");
    }

    #[test]
    fn test_normalize_keeps_inner_punctuation() {
        assert_eq!(normalize_heading_text("Q&A: Notes"), "q&a: notes");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_heading_text(""), "");
        assert_eq!(normalize_heading_text("   "), "");
        assert_eq!(normalize_heading_text("?!"), "");
    }

    #[test]
    fn test_level_matches_exact_marker_only() {
        assert!(HeadingLevel::H2.matches("## Log"));
        assert!(!HeadingLevel::H2.matches("### Log"));
        assert!(!HeadingLevel::H2.matches("##Log"));
        assert!(!HeadingLevel::H2.matches("# Log"));
        assert_eq!(HeadingLevel::H3.text_of("### Details"), Some("Details"));
        assert_eq!(HeadingLevel::H3.text_of("## Details"), None);
    }

    #[test]
    fn test_parent_levels() {
        assert_eq!(HeadingLevel::H1.parent(), HeadingLevel::H1);
        assert_eq!(HeadingLevel::H2.parent(), HeadingLevel::H2);
        assert_eq!(HeadingLevel::H3.parent(), HeadingLevel::H2);
        assert_eq!(HeadingLevel::H4.parent(), HeadingLevel::H3);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("###".parse::<HeadingLevel>().unwrap(), HeadingLevel::H3);
        assert_eq!("2".parse::<HeadingLevel>().unwrap(), HeadingLevel::H2);
        assert!("#####".parse::<HeadingLevel>().is_err());
    }

    #[test]
    fn test_level_toml_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            level: HeadingLevel,
        }

        let text = toml::to_string(&Wrapper {
            level: HeadingLevel::H3,
        })
        .unwrap();
        assert!(text.contains("level = \"###\""));

        let parsed: Wrapper = toml::from_str("level = \"####\"").unwrap();
        assert_eq!(parsed.level, HeadingLevel::H4);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "[ a-zA-Z0-9.,;:!?]{0,32}") {
            let once = normalize_heading_text(&text);
            prop_assert_eq!(normalize_heading_text(&once), once);
        }
    }
}
