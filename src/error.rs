//! Centralized error types for daylog
//!
//! All errors are represented by the `DaylogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, DaylogError>`.

use std::fmt;
use std::path::PathBuf;

/// All daylog errors
#[derive(Debug)]
pub enum DaylogError {
    // === IO ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Config ===
    /// Config file could not be read or written
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected shape
    ConfigParse { path: PathBuf, reason: String },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Store ===
    /// Pending-entry store could not be encoded
    StoreEncode { path: PathBuf, reason: String },

    // === Server ===
    /// Failed to bind the HTTP listener
    ServerBind { port: u16, source: std::io::Error },
    /// Malformed inbound request
    Protocol { message: String },

    // === Runtime ===
    /// Tokio runtime creation failed
    Runtime { source: std::io::Error },
}

impl std::error::Error for DaylogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. }
            | Self::ConfigRead { source, .. }
            | Self::ServerBind { source, .. }
            | Self::Runtime { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for DaylogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "IO error: {}: {}", path.display(), source),
            Self::ConfigRead { path, .. } => write!(f, "Cannot access config: {}", path.display()),
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::StoreEncode { path, reason } => {
                write!(f, "Cannot encode store {}: {}", path.display(), reason)
            }
            Self::ServerBind { port, .. } => write!(f, "Cannot bind HTTP port {}", port),
            Self::Protocol { message } => write!(f, "Protocol error: {}", message),
            Self::Runtime { .. } => write!(f, "Failed to create runtime"),
        }
    }
}

/// Alias for Result with DaylogError
pub type Result<T> = std::result::Result<T, DaylogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_display_includes_path_and_cause() {
        let err = DaylogError::Io {
            path: PathBuf::from("daily/2024-01-01.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let text = err.to_string();
        assert!(text.contains("daily/2024-01-01.md"));
        assert!(text.contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_validation_error_has_no_source() {
        let err = DaylogError::ConfigValidation {
            field: "section_heading_text",
            reason: "must not be empty".into(),
        };
        assert_eq!(err.to_string(), "Invalid section_heading_text: must not be empty");
        assert!(err.source().is_none());
    }
}
