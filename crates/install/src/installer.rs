//! Main installer implementation

use crate::host::{platform_installer, PlatformInstaller};
use crate::{EventSink, InstallConfig, InstallEvent};
use chrono::Utc;
use cpr_errors::{Error, InstallError, PlatformError};
use cpr_platform::Platform;
use cpr_types::{HostOs, InstallPhase, InstallReport};
use std::path::Path;
use tracing::{debug, info};

/// Records the phases a run has passed through
#[derive(Debug, Default)]
struct PhaseTracker {
    phases: Vec<InstallPhase>,
}

impl PhaseTracker {
    fn new() -> Self {
        let mut tracker = Self::default();
        tracker.advance(InstallPhase::Start);
        tracker
    }

    fn advance(&mut self, phase: InstallPhase) {
        debug!(%phase, "install phase");
        self.phases.push(phase);
    }
}

/// Installs the script for one host
pub struct Installer {
    config: InstallConfig,
    host: HostOs,
    platform: Platform,
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("config", &self.config)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl Installer {
    /// Create new installer
    #[must_use]
    pub fn new(config: InstallConfig, host: HostOs, platform: Platform) -> Self {
        Self {
            config,
            host,
            platform,
        }
    }

    /// Installer for the running host using the real filesystem and processes
    #[must_use]
    pub fn for_current_host(config: InstallConfig) -> Self {
        Self::new(config, HostOs::current(), Platform::current())
    }

    #[must_use]
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Copy the script into place
    ///
    /// Nothing is written before the source script and the install directory
    /// are known to exist. A refused copy is retried at most once.
    ///
    /// # Errors
    ///
    /// Returns an [`InstallError`] describing the first fatal condition hit.
    pub fn install(&self, events: &dyn EventSink) -> Result<InstallReport, Error> {
        let mut tracker = PhaseTracker::new();

        match self.run(&mut tracker, events) {
            Ok(report) => Ok(report),
            Err(e) => {
                tracker.advance(InstallPhase::Failed);
                debug!(error = %e, phases = ?tracker.phases, "install failed");
                Err(e)
            }
        }
    }

    fn run(
        &self,
        tracker: &mut PhaseTracker,
        events: &dyn EventSink,
    ) -> Result<InstallReport, Error> {
        let fs = self.platform.filesystem();
        let process = self.platform.process();
        let source = &self.config.source;
        let script_name = &self.config.script_name;

        if !fs.exists(source) {
            return Err(InstallError::SourceNotFound {
                path: source.display().to_string(),
            }
            .into());
        }
        tracker.advance(InstallPhase::SourceChecked);

        let installer = platform_installer(&self.host, &self.config)?;
        let warnings = installer.preflight(process, events);

        let install_dir = match &self.config.install_dir {
            Some(dir) => dir.clone(),
            None => installer.resolve_install_dir(process)?,
        };
        tracker.advance(InstallPhase::DirectoryResolved);

        let destination = self.config.destination_in(&install_dir);
        info!(
            script = %script_name,
            install_dir = %install_dir.display(),
            host = %self.host,
            "installing"
        );
        events.emit(InstallEvent::Started {
            script_name: script_name.clone(),
            install_dir: install_dir.clone(),
        });

        // Never created here: a missing system directory needs a human decision
        if !fs.exists(&install_dir) {
            return Err(InstallError::InstallDirectoryMissing {
                path: install_dir.display().to_string(),
            }
            .into());
        }

        if installer.ensure_executable(fs, source)? {
            events.emit(InstallEvent::MadeExecutable {
                script_name: script_name.clone(),
            });
        }
        tracker.advance(InstallPhase::MadeExecutable);

        let escalated = match Self::copy_into(fs, source, &install_dir, &destination) {
            Ok(bytes) => {
                debug!(bytes, destination = %destination.display(), "copied script");
                tracker.advance(InstallPhase::Copied);
                false
            }
            Err(e) if e.is_permission_denied() => {
                tracker.advance(InstallPhase::PermissionEscalationAttempted);
                self.recover_permission_denied(&*installer, &e, &destination, events)?;
                true
            }
            Err(e) => {
                return Err(InstallError::CopyFailed {
                    destination: destination.display().to_string(),
                    message: e.message().into_owned(),
                }
                .into());
            }
        };

        let wrapper = installer.finalize(fs, &destination)?;
        if let Some(path) = &wrapper {
            events.emit(InstallEvent::WrapperCreated { path: path.clone() });
        }

        tracker.advance(InstallPhase::Succeeded);
        info!(destination = %destination.display(), escalated, "install complete");
        events.emit(InstallEvent::Completed {
            script_name: script_name.clone(),
            destination: destination.clone(),
            escalated_with: escalated.then(|| installer.escalation_program().to_string()),
        });

        Ok(InstallReport {
            script_name: script_name.clone(),
            source: source.clone(),
            install_dir,
            destination,
            platform: self.host.clone(),
            escalated,
            wrapper,
            warnings,
            phases: std::mem::take(&mut tracker.phases),
            installed_at: Utc::now(),
        })
    }

    /// Probe the directory, then copy
    ///
    /// The probe gives an early answer but the copy's own result is what
    /// counts; both report refusals as `PermissionDenied`.
    fn copy_into(
        fs: &dyn cpr_platform::FilesystemOperations,
        source: &Path,
        install_dir: &Path,
        destination: &Path,
    ) -> Result<u64, PlatformError> {
        fs.check_writable(install_dir)?;
        fs.copy_file(source, destination)
    }

    fn recover_permission_denied(
        &self,
        installer: &dyn PlatformInstaller,
        cause: &PlatformError,
        destination: &Path,
        events: &dyn EventSink,
    ) -> Result<(), Error> {
        let escalating = self.config.allow_elevation && installer.can_escalate();
        info!(
            destination = %destination.display(),
            cause = %cause,
            escalating,
            "permission denied"
        );
        events.emit(InstallEvent::PermissionDenied {
            destination: destination.to_path_buf(),
            escalating,
            program: installer.escalation_program().to_string(),
        });

        if self.config.allow_elevation {
            return installer.escalate(
                self.platform.process(),
                &self.config.source,
                destination,
                cause,
            );
        }

        Err(InstallError::PermissionDenied {
            destination: destination.display().to_string(),
            message: cause.message().into_owned(),
            manual_steps: installer.manual_steps(&self.config.source, destination),
            administrator: self.host.is_windows(),
        }
        .into())
    }
}
