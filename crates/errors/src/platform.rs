//! Platform-specific operation errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors that can occur during platform-specific operations
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("filesystem operation failed: {operation} on {path} - {message}")]
    FilesystemOperationFailed {
        operation: String,
        path: String,
        message: String,
    },

    #[error("permission denied: {operation} on {path} - {message}")]
    PermissionDenied {
        operation: String,
        path: String,
        message: String,
    },

    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },
}

impl PlatformError {
    /// Classify an `io::Error` raised while performing `operation` on `path`
    #[must_use]
    pub fn from_io(operation: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: operation.to_string(),
                path: path.display().to_string(),
                message: err.to_string(),
            },
            _ => Self::FilesystemOperationFailed {
                operation: operation.to_string(),
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Whether the failure was a permission refusal
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Underlying OS message without the operation prefix
    #[must_use]
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            Self::FilesystemOperationFailed { message, .. }
            | Self::PermissionDenied { message, .. }
            | Self::ProcessExecutionFailed { message, .. } => Cow::Borrowed(message.as_str()),
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied { .. } => {
                Some("Adjust filesystem permissions or retry with elevated privileges.")
            }
            Self::ProcessExecutionFailed { .. } => {
                Some("Make sure the command is installed and on your PATH.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::FilesystemOperationFailed { .. } => "platform.filesystem_failed",
            Self::PermissionDenied { .. } => "platform.permission_denied",
            Self::ProcessExecutionFailed { .. } => "platform.process_failed",
        };
        Some(code)
    }
}
