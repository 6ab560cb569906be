use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use converter_core::DEFAULT_BASE_URL;
use converter_engine::{AtomicFileWriter, ClientSettings, PersistError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "converter.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub server_url: String,
    pub download_dir: PathBuf,
    pub log: LogDestination,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    /// Unset means no whole-request timeout.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_BASE_URL.to_string(),
            download_dir: PathBuf::from("downloads"),
            log: LogDestination::File,
            log_level: "info".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub(crate) fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ClientSettings::default()
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write config: {0}")]
    Write(#[from] PersistError),
}

/// Reads the config file; a missing file yields the defaults.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn save_config(path: &Path, config: &AppConfig) -> Result<PathBuf, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(config, pretty)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILENAME.to_string());
    let writer = AtomicFileWriter::new(dir);
    Ok(writer.write(&file_name, content.as_bytes())?)
}
