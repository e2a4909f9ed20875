//! Per-platform install behaviour

mod unix;
mod windows;

pub use unix::UnixInstaller;
pub use windows::WindowsInstaller;

use crate::{EventSink, InstallConfig};
use cpr_errors::{Error, InstallError, PlatformError};
use cpr_platform::{FilesystemOperations, ProcessOperations};
use cpr_types::HostOs;
use std::path::{Path, PathBuf};

/// Steps of an install that differ between host families
pub trait PlatformInstaller {
    /// Host family this installer handles
    fn host(&self) -> HostOs;

    /// Checks run before anything is touched; returns warnings, never fails
    fn preflight(&self, _process: &dyn ProcessOperations, _events: &dyn EventSink) -> Vec<String> {
        Vec::new()
    }

    /// Global binary directory for this host
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined.
    fn resolve_install_dir(&self, process: &dyn ProcessOperations) -> Result<PathBuf, Error>;

    /// Give the script executable permission bits
    ///
    /// Returns whether anything was changed.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::MakeExecutableFailed`] if permissions cannot be set.
    fn ensure_executable(
        &self,
        fs: &dyn FilesystemOperations,
        script: &Path,
    ) -> Result<bool, Error>;

    /// Work done after the script is in place; returns any extra file written
    ///
    /// # Errors
    ///
    /// Returns an error if an auxiliary file cannot be written.
    fn finalize(
        &self,
        fs: &dyn FilesystemOperations,
        destination: &Path,
    ) -> Result<Option<PathBuf>, Error>;

    /// Whether a refused copy may be retried with elevated privileges
    fn can_escalate(&self) -> bool;

    /// Name of the program used to escalate, for messages
    fn escalation_program(&self) -> &str;

    /// Retry the copy with elevated privileges; attempted at most once per run
    ///
    /// Hosts without an escalation mechanism return the refusal with manual
    /// steps instead.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::EscalationFailed`] or
    /// [`InstallError::PermissionDenied`], both carrying the manual steps.
    fn escalate(
        &self,
        process: &dyn ProcessOperations,
        source: &Path,
        destination: &Path,
        cause: &PlatformError,
    ) -> Result<(), Error>;

    /// Commands a user can run to finish the install by hand
    fn manual_steps(&self, source: &Path, destination: &Path) -> Vec<String>;
}

/// Pick the installer for `host`
///
/// # Errors
///
/// Returns [`InstallError::UnsupportedPlatform`] for hosts outside Linux,
/// macOS and Windows.
pub fn platform_installer(
    host: &HostOs,
    config: &InstallConfig,
) -> Result<Box<dyn PlatformInstaller>, Error> {
    match host {
        HostOs::Linux | HostOs::MacOs => Ok(Box::new(UnixInstaller::new(host.clone(), config))),
        HostOs::Windows => Ok(Box::new(WindowsInstaller::new(config))),
        HostOs::Other(platform) => Err(InstallError::UnsupportedPlatform {
            platform: platform.clone(),
        }
        .into()),
    }
}

/// Resolve the global binary directory for `host`
///
/// # Errors
///
/// Returns [`InstallError::UnsupportedPlatform`] for unknown hosts.
pub fn resolve_install_dir(
    host: &HostOs,
    config: &InstallConfig,
    process: &dyn ProcessOperations,
) -> Result<PathBuf, Error> {
    platform_installer(host, config)?.resolve_install_dir(process)
}
