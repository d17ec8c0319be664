use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::check::revision::RevisionMarkers;

// =============================================================================
// Defaults
// =============================================================================

/// Gist page publishing the monitored IP list
pub const DEFAULT_URL: &str = "https://gist.github.com/ervinb/ecab6ca35ec87ed0cadf";

/// Save file holding the last-seen revision, relative to the working directory
pub const DEFAULT_STATE_FILE: &str = "previous_version";

/// Connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Mode applied to a newly created save file (group/other may write)
pub const DEFAULT_FILE_MODE: u32 = 0o766;

/// Name of the list used in status messages
pub const DEFAULT_LIST_NAME: &str = "IP list";

/// Check configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    pub url: String,
    pub state_file: PathBuf,
    pub connect_timeout_secs: u64,
    /// Overall request timeout; unset means only the connect phase is bounded
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub list_name: String,
    pub markers: RevisionMarkers,
    /// Octal mode string such as `"0766"`
    #[serde(deserialize_with = "deserialize_octal_mode")]
    pub file_mode: u32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            list_name: DEFAULT_LIST_NAME.to_string(),
            markers: RevisionMarkers::default(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

/// Error type for loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl CheckConfig {
    /// Loads a JSON config file; fields it omits keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid("url must not be empty".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.markers.prefix.is_empty() || self.markers.suffix.is_empty() {
            return Err(ConfigError::Invalid(
                "revision markers must not be empty".to_string(),
            ));
        }
        if self.file_mode > 0o7777 {
            return Err(ConfigError::Invalid(format!(
                "file mode {:o} is out of range",
                self.file_mode
            )));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn deserialize_octal_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let digits = raw.trim_start_matches("0o");
    u32::from_str_radix(digits, 8)
        .map_err(|e| serde::de::Error::custom(format!("invalid octal file mode {:?}: {}", raw, e)))
}

/// Directory for the default log file: `$XDG_DATA_HOME`, then `~/.local/share`, then `.`
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path of the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("check-gist-revision.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("check-gist-revision")
}
