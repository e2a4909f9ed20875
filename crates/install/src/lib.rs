#![warn(clippy::pedantic)]
#![deny(clippy::all)]

//! Script installation for the cpr wrapper
//!
//! This crate copies the `cpr` script into the host's global binary
//! directory, makes it executable and, when the directory is not writable,
//! retries the copy once through privilege escalation.

mod config;
mod events;
mod host;
mod installer;
mod source;

pub use config::InstallConfig;
pub use events::{EventSink, InstallEvent, NullSink};
pub use host::{
    platform_installer, resolve_install_dir, PlatformInstaller, UnixInstaller, WindowsInstaller,
};
pub use installer::Installer;
pub use source::default_source_path;

pub use cpr_types::{HostOs, InstallPhase, InstallReport};
