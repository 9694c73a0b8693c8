//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (applied with [`Config::with_overrides`])
//!
//! # Config Locations
//!
//! An explicit `--config` path is used as-is and must exist. Otherwise the
//! first existing file of:
//! 1. `$CHANGESETS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/changesets/config.toml`
//! 3. `~/.changesets/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use changeset_loader::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Server: {}", config.server());
//! println!("Region: {}", config.region());
//! ```

pub mod schema;

pub use schema::{validate_region, FileConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::query::DEFAULT_MAX_CHANGESETS;
use crate::loader::{LoaderOptions, DEFAULT_REGION};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CHANGESETS_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Effective configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: FileConfig,
    /// Path the file values came from (if any)
    path: Option<PathBuf>,
    /// `--server` override
    server_override: Option<String>,
    /// `--region` override
    region_override: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// With `explicit` set, that file is read and must exist. Otherwise the
    /// standard locations are searched; if none exists, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let candidates = search_paths(
            std::env::var(CONFIG_ENV).ok(),
            std::env::var("XDG_CONFIG_HOME").ok(),
            dirs::home_dir(),
        );
        match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_file(path)?;
        file.validate()?;
        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the region override is invalid.
    pub fn with_overrides(
        mut self,
        server: Option<String>,
        region: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(ref region) = region {
            validate_region(region)?;
        }
        if server.is_some() {
            self.server_override = server;
        }
        if region.is_some() {
            self.region_override = region;
        }
        Ok(self)
    }

    /// Get the canonical path for the user config.
    ///
    /// Returns `~/.changesets/config.toml`.
    pub fn user_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".changesets/config.toml"))
    }

    /// Write `config` to `path` atomically.
    ///
    /// Creates parent directories if needed. Writes to a temp file in the
    /// same directory, then renames it into place.
    pub fn write_to(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the server base URL.
    ///
    /// Defaults to the empty string if not configured.
    pub fn server(&self) -> &str {
        self.server_override
            .as_deref()
            .or(self.file.server.as_deref())
            .unwrap_or("")
    }

    /// Get the display region id.
    ///
    /// Defaults to "changesets" if not configured.
    pub fn region(&self) -> &str {
        self.region_override
            .as_deref()
            .or(self.file.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
    }

    /// Get the maximum number of ids accepted when normalizing a query.
    ///
    /// Defaults to 20 if not configured.
    pub fn max_changesets(&self) -> usize {
        self.file.max_changesets.unwrap_or(DEFAULT_MAX_CHANGESETS)
    }

    /// Loader settings derived from this configuration.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions::new(self.server()).with_region(self.region())
    }

    /// Get the path of the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Candidate config files in search order.
fn search_paths(
    config_env: Option<String>,
    xdg_config_home: Option<String>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = config_env {
        paths.push(PathBuf::from(path));
    }
    if let Some(xdg) = xdg_config_home {
        paths.push(PathBuf::from(xdg).join("changesets/config.toml"));
    }
    if let Some(home) = home {
        paths.push(home.join(".changesets/config.toml"));
    }
    paths
}
