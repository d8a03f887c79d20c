use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid config file {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Locates, reads and writes `config.toml`.
///
/// Reading never writes: a missing default file means default settings, and
/// a file is only created through [`StorageManager::write_default_config`].
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Creates a manager for the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Creates a manager rooted at `path`.
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the default config file path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Loads the configuration.
    ///
    /// An explicit `path_override` must exist and parse. The default file may
    /// be missing or malformed; defaults are used in both cases.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the override is missing or invalid, or a file cannot be read.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        if let Some(path) = path_override {
            let content =
                read_if_present(path)?.ok_or_else(|| ConfigError::NotFound(path.into()))?;
            return toml::from_str(&content).map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            });
        }

        let path = self.config_path();
        let Some(content) = read_if_present(&path)? else {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        };

        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
            AppConfig::default()
        }))
    }

    /// Writes a config file holding the defaults to `target`, or to the default path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` unless `force` is set, or an I/O error.
    pub fn write_default_config(
        &self,
        target: Option<&Path>,
        force: bool,
    ) -> Result<PathBuf, ConfigError> {
        let path = target.map_or_else(|| self.config_path(), Path::to_path_buf);
        if !force && path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }

        let content = toml::to_string_pretty(&AppConfig::default())?;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&path).map_err(|e| e.error)?;

        info!(path = %path.display(), "Wrote default config");
        Ok(path)
    }
}

fn read_if_present(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
