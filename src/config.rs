//! Configuration management
//!
//! Config file lives in the user config directory as `daylog/config.toml`
//! unless `--config` points elsewhere. Every section and field is optional;
//! missing values take their defaults.

use crate::cache::{JsonFileStore, PendingCache};
use crate::constants::{
    DEFAULT_CACHE_KEY, DEFAULT_DATE_FORMAT, DEFAULT_ENTRY_FORMAT, DEFAULT_HEADING_TEXT,
    DEFAULT_HTTP_PORT, DEFAULT_MANUAL_ENTRY_FORMAT, DEFAULT_NOTE_EXTENSION, ENTRY_PLACEHOLDER,
};
use crate::error::{DaylogError, Result};
use crate::journal::LogSettings;
use crate::markdown::{HeadingLevel, InsertPosition};
use crate::notes::DailyNotes;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_DIR: &str = "daylog";

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub notes: NotesConfig,
    pub server: ServerConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Template for entries from the HTTP endpoint
    pub log_entry_format: String,
    /// Template for entries typed in with `daylog add`
    pub manual_log_entry_format: String,
    /// Level of the heading entries are filed under ("#" to "####")
    pub section_heading_level: HeadingLevel,
    /// Text of that heading, matched case-insensitively
    pub section_heading_text: String,
    /// Where the heading is created when missing (unknown values mean file end)
    #[serde(deserialize_with = "lenient_position")]
    pub heading_insert_position: InsertPosition,
    /// Store key for the pending-entry backlog
    pub cache_key: String,
}

fn lenient_position<'de, D>(deserializer: D) -> std::result::Result<InsertPosition, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(InsertPosition::parse_lenient(&raw))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Directory holding daily notes (`~` expands to the home directory)
    pub directory: String,
    /// chrono strftime pattern of the note file stem
    pub date_format: String,
    /// Note file extension, without the dot
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Localhost port for `GET /log`
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Pending-entry store file (default: `<data dir>/daylog/cache.json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_entry_format: DEFAULT_ENTRY_FORMAT.to_string(),
            manual_log_entry_format: DEFAULT_MANUAL_ENTRY_FORMAT.to_string(),
            section_heading_level: HeadingLevel::H2,
            section_heading_text: DEFAULT_HEADING_TEXT.to_string(),
            heading_insert_position: InsertPosition::LastSection,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            directory: "~/notes/daily".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            extension: DEFAULT_NOTE_EXTENSION.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
        }
    }
}

impl LogConfig {
    pub fn to_settings(&self) -> LogSettings {
        LogSettings {
            format: self.log_entry_format.clone(),
            manual_format: self.manual_log_entry_format.clone(),
            heading_level: self.section_heading_level,
            heading_text: self.section_heading_text.clone(),
            insert_position: self.heading_insert_position,
        }
    }
}

impl NotesConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        expand_home(&self.directory)
    }

    pub fn daily_notes(&self) -> DailyNotes {
        DailyNotes::new(self.resolved_dir(), self.date_format.clone(), self.extension.clone())
    }
}

impl CacheConfig {
    /// Configured store path, or the default under the user data directory
    pub fn resolved_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(expand_home(&path.to_string_lossy()));
        }
        let data = dirs::data_dir().ok_or_else(|| DaylogError::ConfigValidation {
            field: "cache.path",
            reason: "no data directory on this platform, set it explicitly".into(),
        })?;
        Ok(data.join(APP_DIR).join("cache.json"))
    }
}

impl Config {
    /// Reject values the journal cannot work with; warn about suspicious ones
    pub fn validate(&self) -> Result<()> {
        if self.log.section_heading_text.trim().is_empty() {
            return Err(DaylogError::ConfigValidation {
                field: "log.section_heading_text",
                reason: "must not be empty".into(),
            });
        }
        if self.log.cache_key.trim().is_empty() {
            return Err(DaylogError::ConfigValidation {
                field: "log.cache_key",
                reason: "must not be empty".into(),
            });
        }
        if self.notes.date_format.trim().is_empty() {
            return Err(DaylogError::ConfigValidation {
                field: "notes.date_format",
                reason: "must not be empty".into(),
            });
        }

        for (field, template) in [
            ("log.log_entry_format", &self.log.log_entry_format),
            ("log.manual_log_entry_format", &self.log.manual_log_entry_format),
        ] {
            if !template.contains(ENTRY_PLACEHOLDER) {
                warn!("{} has no {} placeholder, entry text will be dropped", field, ENTRY_PLACEHOLDER);
            }
        }
        Ok(())
    }

    /// Pending cache backed by the configured JSON store
    pub fn open_cache(&self) -> Result<PendingCache<JsonFileStore>> {
        let store = JsonFileStore::open(self.cache.resolved_path()?);
        Ok(PendingCache::new(store, self.log.cache_key.clone()))
    }
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Default config file path (`<config dir>/daylog/config.toml`)
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| DaylogError::ConfigValidation {
        field: "config_path",
        reason: "no config directory on this platform".into(),
    })?;
    Ok(dir.join(APP_DIR).join("config.toml"))
}

/// Load config from `path`; a missing file yields defaults
pub fn try_load(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| DaylogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| DaylogError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load config from `path`, falling back to defaults on any error
pub fn load(path: &Path) -> Config {
    match try_load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Save config to `path`, creating its directory
pub fn save(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| DaylogError::ConfigRead {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let content = toml::to_string_pretty(config).map_err(|e| DaylogError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| DaylogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Tests
// ============================================================================
