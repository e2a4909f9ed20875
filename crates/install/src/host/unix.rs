//! Linux and macOS installs

use crate::InstallConfig;
use cpr_config::constants::{EXECUTABLE_MODE, UNIX_INSTALL_DIR};
use cpr_errors::{Error, InstallError, PlatformError};
use cpr_platform::{FilesystemOperations, ProcessOperations};
use cpr_types::HostOs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::PlatformInstaller;

/// Installs into `/usr/local/bin`, escalating with `sudo` when refused
#[derive(Debug, Clone)]
pub struct UnixInstaller {
    host: HostOs,
    elevation_program: String,
}

impl UnixInstaller {
    #[must_use]
    pub fn new(host: HostOs, config: &InstallConfig) -> Self {
        Self {
            host,
            elevation_program: config.elevation_program.clone(),
        }
    }

    fn copy_step(&self, source: &Path, destination: &Path) -> String {
        format!(
            "{} cp \"{}\" \"{}\"",
            self.elevation_program,
            source.display(),
            destination.display()
        )
    }

    fn chmod_step(&self, destination: &Path) -> String {
        format!(
            "{} chmod {EXECUTABLE_MODE:o} \"{}\"",
            self.elevation_program,
            destination.display()
        )
    }

    fn escalation_failed(&self, source: &Path, destination: &Path, message: String) -> Error {
        InstallError::EscalationFailed {
            program: self.elevation_program.clone(),
            message,
            manual_steps: self.manual_steps(source, destination),
        }
        .into()
    }
}

impl PlatformInstaller for UnixInstaller {
    fn host(&self) -> HostOs {
        self.host.clone()
    }

    fn resolve_install_dir(&self, _process: &dyn ProcessOperations) -> Result<PathBuf, Error> {
        Ok(PathBuf::from(UNIX_INSTALL_DIR))
    }

    fn ensure_executable(
        &self,
        fs: &dyn FilesystemOperations,
        script: &Path,
    ) -> Result<bool, Error> {
        fs.set_mode(script, EXECUTABLE_MODE).map_err(|e| {
            InstallError::MakeExecutableFailed {
                path: script.display().to_string(),
                message: e.message().into_owned(),
            }
        })?;
        Ok(true)
    }

    fn finalize(
        &self,
        _fs: &dyn FilesystemOperations,
        _destination: &Path,
    ) -> Result<Option<PathBuf>, Error> {
        Ok(None)
    }

    fn can_escalate(&self) -> bool {
        true
    }

    fn escalation_program(&self) -> &str {
        &self.elevation_program
    }

    fn escalate(
        &self,
        process: &dyn ProcessOperations,
        source: &Path,
        destination: &Path,
        _cause: &PlatformError,
    ) -> Result<(), Error> {
        let mode = format!("{EXECUTABLE_MODE:o}");
        let source_arg = source.display().to_string();
        let destination_arg = destination.display().to_string();

        let mut copy = process.create_command(&self.elevation_program);
        copy.args(["cp", source_arg.as_str(), destination_arg.as_str()]);

        let mut chmod = process.create_command(&self.elevation_program);
        chmod.args(["chmod", mode.as_str(), destination_arg.as_str()]);

        // Stop at the first failing command; the whole sequence is one attempt
        for cmd in [&copy, &chmod] {
            info!(command = %cmd, "running elevated command");
            let output = process
                .run_interactive(cmd)
                .map_err(|e| self.escalation_failed(source, destination, e.message().into_owned()))?;

            if !output.success() {
                warn!(command = %cmd, status = %output.status_string(), "elevated command failed");
                return Err(self.escalation_failed(
                    source,
                    destination,
                    format!("command failed: {cmd} ({})", output.status_string()),
                ));
            }
        }

        Ok(())
    }

    fn manual_steps(&self, source: &Path, destination: &Path) -> Vec<String> {
        vec![
            self.copy_step(source, destination),
            self.chmod_step(destination),
        ]
    }
}
