//! Windows installs

use crate::{EventSink, InstallConfig, InstallEvent};
use cpr_config::constants::{WINDOWS_FALLBACK_SUBDIR, WRAPPER_EXTENSION};
use cpr_errors::{Error, InstallError, PlatformError};
use cpr_platform::{FilesystemOperations, ProcessOperations};
use cpr_types::HostOs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::PlatformInstaller;

/// Installs into npm's global bin directory and adds a `.cmd` launcher
///
/// Executability on Windows comes from the launcher's extension, so no
/// permission bits are touched and a refused copy is never escalated.
#[derive(Debug, Clone)]
pub struct WindowsInstaller {
    script_name: String,
    package_manager: String,
    shell: String,
    app_data: Option<String>,
}

impl WindowsInstaller {
    #[must_use]
    pub fn new(config: &InstallConfig) -> Self {
        Self {
            script_name: config.script_name.clone(),
            package_manager: config.package_manager.clone(),
            shell: config.shell.clone(),
            app_data: config.app_data.clone(),
        }
    }

    /// Check that the shell the launcher relies on can be started
    ///
    /// Returns the warning lines to show when it cannot.
    pub fn check_shell(&self, process: &dyn ProcessOperations) -> Option<Vec<String>> {
        let mut cmd = process.create_command(&self.shell);
        cmd.arg("--version");

        match process.execute_command(&cmd) {
            Ok(output) if output.success() => None,
            result => {
                debug!(shell = %self.shell, ?result, "shell check failed");
                Some(vec![
                    format!(
                        "{} not found. Make sure Git Bash or WSL is installed.",
                        self.shell
                    ),
                    format!(
                        "The {} script requires {} to run on Windows.",
                        self.script_name, self.shell
                    ),
                ])
            }
        }
    }

    /// Contents of the launcher written next to the script
    #[must_use]
    pub fn wrapper_contents(&self) -> String {
        format!(
            "@echo off\n{} \"%~dp0{}\" %*",
            self.shell, self.script_name
        )
    }

    /// Launcher path: the destination with the command extension appended
    #[must_use]
    pub fn wrapper_path(destination: &Path) -> PathBuf {
        let mut path = destination.as_os_str().to_owned();
        path.push(".");
        path.push(WRAPPER_EXTENSION);
        PathBuf::from(path)
    }

    fn fallback_dir(&self) -> PathBuf {
        PathBuf::from(self.app_data.clone().unwrap_or_default()).join(WINDOWS_FALLBACK_SUBDIR)
    }
}

impl PlatformInstaller for WindowsInstaller {
    fn host(&self) -> HostOs {
        HostOs::Windows
    }

    fn preflight(&self, process: &dyn ProcessOperations, events: &dyn EventSink) -> Vec<String> {
        let warnings = self.check_shell(process).unwrap_or_default();
        for message in &warnings {
            debug!("{message}");
            events.emit(InstallEvent::Warning {
                message: message.clone(),
            });
        }
        warnings
    }

    fn resolve_install_dir(&self, process: &dyn ProcessOperations) -> Result<PathBuf, Error> {
        // npm is a .cmd shim on Windows and has to go through the command interpreter
        let mut cmd = process.create_command("cmd");
        cmd.args(["/C", self.package_manager.as_str(), "bin", "-g"]);

        match process.execute_command(&cmd) {
            Ok(output) if output.success() && !output.stdout_trimmed().is_empty() => {
                Ok(PathBuf::from(output.stdout_trimmed()))
            }
            result => {
                let fallback = self.fallback_dir();
                debug!(?result, fallback = %fallback.display(), "package manager query failed");
                Ok(fallback)
            }
        }
    }

    fn ensure_executable(
        &self,
        _fs: &dyn FilesystemOperations,
        _script: &Path,
    ) -> Result<bool, Error> {
        Ok(false)
    }

    fn finalize(
        &self,
        fs: &dyn FilesystemOperations,
        destination: &Path,
    ) -> Result<Option<PathBuf>, Error> {
        let wrapper = Self::wrapper_path(destination);
        fs.write_file(&wrapper, self.wrapper_contents().as_bytes())
            .map_err(|e| InstallError::WrapperFailed {
                path: wrapper.display().to_string(),
                message: e.message().into_owned(),
            })?;
        Ok(Some(wrapper))
    }

    fn can_escalate(&self) -> bool {
        false
    }

    fn escalation_program(&self) -> &str {
        "Administrator"
    }

    fn escalate(
        &self,
        _process: &dyn ProcessOperations,
        source: &Path,
        destination: &Path,
        cause: &PlatformError,
    ) -> Result<(), Error> {
        Err(InstallError::PermissionDenied {
            destination: destination.display().to_string(),
            message: cause.message().into_owned(),
            manual_steps: self.manual_steps(source, destination),
            administrator: true,
        }
        .into())
    }

    fn manual_steps(&self, source: &Path, destination: &Path) -> Vec<String> {
        vec![format!(
            "copy \"{}\" \"{}\"",
            source.display(),
            destination.display()
        )]
    }
}
