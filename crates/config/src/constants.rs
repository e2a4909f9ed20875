//! Fixed names and paths used by the installer
//!
//! These are the built-in defaults. Most of them can be overridden through the
//! config file, but the Unix install directory is only replaced by an explicit
//! `install_dir` override.

/// Name of the installed command and of the script shipped next to the installer
pub const DEFAULT_SCRIPT_NAME: &str = "cpr";

/// Global binary directory on Linux and macOS
pub const UNIX_INSTALL_DIR: &str = "/usr/local/bin";

/// Directory under `%APPDATA%` used when npm cannot report its global bin dir
pub const WINDOWS_FALLBACK_SUBDIR: &str = "npm";

/// Mode applied to the script: rwxr-xr-x
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Extension of the Windows launcher written next to the script
pub const WRAPPER_EXTENSION: &str = "cmd";

pub const DEFAULT_ELEVATION_PROGRAM: &str = "sudo";
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";
pub const DEFAULT_SHELL: &str = "bash";

/// Config file name under the user config directory
pub const CONFIG_FILE_NAME: &str = "setup.toml";
