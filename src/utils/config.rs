use crate::error::{Error, Result};
use crate::logging::{DEFAULT_MAXIMUM_LOG_MESSAGES, Level};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "uuid-log.toml";

/// where the release check finds its inputs, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// manifest declaring the build version (default: "library.json")
    pub manifest_file: PathBuf,

    /// changelog with the release headings (default: "docs/changelog.rst")
    pub changelog_file: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            manifest_file: PathBuf::from("library.json"),
            changelog_file: PathBuf::from("docs/changelog.rst"),
        }
    }
}

/// settings for log output handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// queued messages kept by a print handler before the oldest is dropped
    pub maximum_log_messages: usize,

    /// minimum level the print handler is registered with
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            maximum_log_messages: DEFAULT_MAXIMUM_LOG_MESSAGES,
            level: Level::All,
        }
    }
}

/// main configuration, read from `uuid-log.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidLogConfig {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl UuidLogConfig {
    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: UuidLogConfig = toml::from_str(&contents).map_err(|e| Error::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// find and load `uuid-log.toml` in the project root
    ///
    /// returns the default config if the file is missing or unreadable
    pub fn load_or_default<P: AsRef<Path>>(root: P) -> Self {
        match Self::find_config_file(&root) {
            Some(config_path) => Self::load_from_file(&config_path).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {}", config_path.display(), e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn find_config_file<P: AsRef<Path>>(root: P) -> Option<PathBuf> {
        let config_path = root.as_ref().join(CONFIG_FILE_NAME);

        if config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }
}
