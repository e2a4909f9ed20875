//! Report type definitions for install runs

use crate::HostOs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Phases a single install run moves through
///
/// `Succeeded` and `Failed` are terminal. Nothing is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallPhase {
    Start,
    SourceChecked,
    DirectoryResolved,
    MadeExecutable,
    Copied,
    PermissionEscalationAttempted,
    Succeeded,
    Failed,
}

impl InstallPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::SourceChecked => "source_checked",
            Self::DirectoryResolved => "directory_resolved",
            Self::MadeExecutable => "made_executable",
            Self::Copied => "copied",
            Self::PermissionEscalationAttempted => "permission_escalation_attempted",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Installation report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallReport {
    /// Name of the installed command
    pub script_name: String,
    /// Script that was copied
    pub source: PathBuf,
    /// Directory the script was copied into
    pub install_dir: PathBuf,
    /// Final location of the script
    pub destination: PathBuf,
    /// Host the install ran for
    pub platform: HostOs,
    /// Whether the copy went through privilege escalation
    pub escalated: bool,
    /// Windows launcher written next to the script
    pub wrapper: Option<PathBuf>,
    /// Non-fatal problems noticed along the way
    pub warnings: Vec<String>,
    /// Phases visited, in order
    pub phases: Vec<InstallPhase>,
    /// Completion time
    pub installed_at: DateTime<Utc>,
}

impl InstallReport {
    /// Final phase of the run
    #[must_use]
    pub fn final_phase(&self) -> Option<InstallPhase> {
        self.phases.last().copied()
    }
}
