#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for the cpr installer
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/cpr/setup.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;

use serde::{Deserialize, Serialize};
use cpr_errors::{ConfigError, Error};
use cpr_types::ColorChoice;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub install: InstallSettings,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub color: ColorChoice,
}

/// Path overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Script to install instead of the one next to the installer
    pub source: Option<PathBuf>,
    /// Directory to install into instead of the platform default
    pub install_dir: Option<PathBuf>,
}

/// Install behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSettings {
    #[serde(default = "default_script_name")]
    pub script_name: String,
    #[serde(default = "default_allow_elevation")]
    pub allow_elevation: bool,
    #[serde(default = "default_elevation_program")]
    pub elevation_program: String,
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            script_name: default_script_name(),
            allow_elevation: default_allow_elevation(),
            elevation_program: default_elevation_program(),
            package_manager: default_package_manager(),
            shell: default_shell(),
        }
    }
}

// Default value functions for serde
fn default_script_name() -> String {
    constants::DEFAULT_SCRIPT_NAME.to_string()
}

fn default_allow_elevation() -> bool {
    true
}

fn default_elevation_program() -> String {
    constants::DEFAULT_ELEVATION_PROGRAM.to_string()
}

fn default_package_manager() -> String {
    constants::DEFAULT_PACKAGE_MANAGER.to_string()
}

fn default_shell() -> String {
    constants::DEFAULT_SHELL.to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("cpr").join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
            path: path.display().to_string(),
        })?;

        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub fn load() -> Result<Self, Error> {
        // No config directory is not an error for an installer that may run
        // under a minimal environment.
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path),
            None => Self::load(),
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // CPR_INSTALL_DIR
        if let Ok(dir) = std::env::var("CPR_INSTALL_DIR") {
            if dir.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "CPR_INSTALL_DIR".to_string(),
                    value: dir,
                }
                .into());
            }
            self.paths.install_dir = Some(PathBuf::from(dir));
        }

        // CPR_SOURCE
        if let Ok(source) = std::env::var("CPR_SOURCE") {
            if source.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "CPR_SOURCE".to_string(),
                    value: source,
                }
                .into());
            }
            self.paths.source = Some(PathBuf::from(source));
        }

        // CPR_NO_ELEVATE
        if let Ok(no_elevate) = std::env::var("CPR_NO_ELEVATE") {
            self.install.allow_elevation = match no_elevate.as_str() {
                "true" | "1" | "yes" => false,
                "false" | "0" | "no" => true,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CPR_NO_ELEVATE".to_string(),
                        value: no_elevate,
                    }
                    .into())
                }
            };
        }

        // CPR_COLOR
        if let Ok(color) = std::env::var("CPR_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CPR_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }
}
