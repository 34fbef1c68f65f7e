//! Configuration file handling for pagefx.
//!
//! Settings live in `config.toml` in the platform config directory. A missing
//! file or missing keys fall back to the widget defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use pagefx_favicon::FaviconConfig;
use pagefx_particles::ParticleFieldConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings for both widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub favicon: FaviconConfig,
    pub particles: ParticleFieldConfig,
}

impl Config {
    /// Platform directories for pagefx.
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "pagefx")
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Directory for runtime data such as logs.
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        Self::project_dirs()
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)
    }
}
