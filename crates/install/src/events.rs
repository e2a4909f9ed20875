//! Progress events emitted while installing

use std::path::PathBuf;

/// Something the user should hear about while the install runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// Non-fatal problem, installation continues
    Warning { message: String },
    Started {
        script_name: String,
        install_dir: PathBuf,
    },
    MadeExecutable { script_name: String },
    /// Write access was refused; `escalating` tells whether a retry follows
    PermissionDenied {
        destination: PathBuf,
        escalating: bool,
        program: String,
    },
    WrapperCreated { path: PathBuf },
    /// `escalated_with` names the program the copy was retried through
    Completed {
        script_name: String,
        destination: PathBuf,
        escalated_with: Option<String>,
    },
}

/// Receiver for install events
pub trait EventSink {
    fn emit(&self, event: InstallEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: InstallEvent) {}
}
