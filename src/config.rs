//! Persisted settings

use crate::{LogFindError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "LOGFIND_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";

/// Settings kept between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Last folder the user selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<PathBuf>,
}

/// Reads and writes the config file
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Use `$LOGFIND_CONFIG`, else `<config dir>/logfind/config.json`
    pub fn new() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(Self::at(PathBuf::from(path)));
        }

        let dir = match dirs::config_dir() {
            Some(dir) => dir.join("logfind"),
            None => home::home_dir()
                .ok_or(LogFindError::ConfigDirNotFound)?
                .join(".logfind"),
        };

        Ok(Self::at(dir.join(CONFIG_FILE_NAME)))
    }

    /// Use an explicit config file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        tracing::debug!("loading config from {}", self.path.display());

        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("config file does not exist");
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&text) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("ignoring malformed config {}: {}", self.path.display(), e);
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, text)?;
        tracing::debug!("saved config to {}", self.path.display());
        Ok(())
    }

    /// Validate `folder` and store it as the default search folder
    pub fn remember_folder(&self, folder: &Path) -> Result<PathBuf> {
        if !folder.exists() {
            return Err(LogFindError::FolderNotFound(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(LogFindError::NotADirectory(folder.to_path_buf()));
        }
        let folder = folder.canonicalize()?;

        let mut config = self.load()?;
        config.folder_path = Some(folder.clone());
        self.save(&config)?;
        Ok(folder)
    }
}
