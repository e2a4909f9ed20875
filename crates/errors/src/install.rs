//! Installation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum InstallError {
    #[error("unsupported platform: {platform}")]
    UnsupportedPlatform { platform: String },

    #[error("script not found: {path}")]
    SourceNotFound { path: String },

    #[error("install directory does not exist: {path}")]
    InstallDirectoryMissing { path: String },

    #[error("failed to make script executable: {path}: {message}")]
    MakeExecutableFailed { path: String, message: String },

    /// Write access to the destination was refused and no escalation was tried.
    #[error("permission denied: {destination}: {message}")]
    PermissionDenied {
        destination: String,
        message: String,
        manual_steps: Vec<String>,
        /// Windows hosts suggest an Administrator shell instead of sudo
        administrator: bool,
    },

    #[error("failed to install with {program}: {message}")]
    EscalationFailed {
        program: String,
        message: String,
        manual_steps: Vec<String>,
    },

    #[error("failed to install: {message}")]
    CopyFailed { destination: String, message: String },

    #[error("failed to write launcher {path}: {message}")]
    WrapperFailed { path: String, message: String },
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedPlatform { .. } => {
                Some("Only Linux, macOS and Windows hosts are supported.")
            }
            Self::SourceNotFound { .. } => {
                Some("Run the installer from its own directory or pass --source.")
            }
            Self::InstallDirectoryMissing { .. } => Some("You may need to create it first."),
            Self::PermissionDenied {
                administrator: true,
                ..
            } => Some("Try running as Administrator or copy manually."),
            Self::PermissionDenied { .. } | Self::EscalationFailed { .. } => {
                Some("Manual installation steps are listed above.")
            }
            _ => None,
        }
    }

    fn remediation(&self) -> Vec<String> {
        match self {
            Self::InstallDirectoryMissing { path } => vec![format!("sudo mkdir -p {path}")],
            Self::PermissionDenied { manual_steps, .. }
            | Self::EscalationFailed { manual_steps, .. } => manual_steps.clone(),
            _ => Vec::new(),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnsupportedPlatform { .. } => "install.unsupported_platform",
            Self::SourceNotFound { .. } => "install.source_not_found",
            Self::InstallDirectoryMissing { .. } => "install.directory_missing",
            Self::MakeExecutableFailed { .. } => "install.make_executable_failed",
            Self::PermissionDenied { .. } => "install.permission_denied",
            Self::EscalationFailed { .. } => "install.escalation_failed",
            Self::CopyFailed { .. } => "install.copy_failed",
            Self::WrapperFailed { .. } => "install.wrapper_failed",
        };
        Some(code)
    }
}
