//! Installer configuration

use cpr_config::constants::{
    DEFAULT_ELEVATION_PROGRAM, DEFAULT_PACKAGE_MANAGER, DEFAULT_SCRIPT_NAME, DEFAULT_SHELL,
};
use cpr_config::Config;
use std::path::PathBuf;

/// Everything a single install run needs to know
#[derive(Clone, Debug)]
pub struct InstallConfig {
    /// Script to copy
    pub source: PathBuf,
    /// File name of the installed command
    pub script_name: String,
    /// Skip platform resolution and install here
    pub install_dir: Option<PathBuf>,
    /// Retry a refused copy through `elevation_program`
    pub allow_elevation: bool,
    pub elevation_program: String,
    /// Queried for its global bin directory on Windows
    pub package_manager: String,
    /// Interpreter the Windows launcher runs the script with
    pub shell: String,
    /// `APPDATA` value used for the Windows fallback directory
    pub app_data: Option<String>,
}

impl InstallConfig {
    /// Config with built-in defaults for the given script
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            install_dir: None,
            allow_elevation: true,
            elevation_program: DEFAULT_ELEVATION_PROGRAM.to_string(),
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            app_data: None,
        }
    }

    /// Build from loaded settings; `APPDATA` is read from the environment
    #[must_use]
    pub fn from_settings(settings: &Config, source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            script_name: settings.install.script_name.clone(),
            install_dir: settings.paths.install_dir.clone(),
            allow_elevation: settings.install.allow_elevation,
            elevation_program: settings.install.elevation_program.clone(),
            package_manager: settings.install.package_manager.clone(),
            shell: settings.install.shell.clone(),
            app_data: std::env::var("APPDATA").ok(),
        }
    }

    /// Install into a fixed directory
    #[must_use]
    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    /// Enable/disable privilege escalation
    #[must_use]
    pub fn with_elevation(mut self, allow: bool) -> Self {
        self.allow_elevation = allow;
        self
    }

    /// Set the `APPDATA` value
    #[must_use]
    pub fn with_app_data(mut self, app_data: Option<String>) -> Self {
        self.app_data = app_data;
        self
    }

    /// Where the script ends up inside `install_dir`
    #[must_use]
    pub fn destination_in(&self, install_dir: &std::path::Path) -> PathBuf {
        install_dir.join(&self.script_name)
    }
}
