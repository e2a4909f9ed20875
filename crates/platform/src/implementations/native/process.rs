//! Native process operations implementation

use cpr_errors::PlatformError;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::debug;

use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Runs commands through `std::process::Command`
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn build_command(cmd: &PlatformCommand) -> Command {
    let mut command = Command::new(cmd.program());
    command.args(cmd.get_args());
    command
}

fn spawn_error(cmd: &PlatformCommand, err: &std::io::Error) -> PlatformError {
    PlatformError::ProcessExecutionFailed {
        command: cmd.program().to_string(),
        message: err.to_string(),
    }
}

impl ProcessOperations for NativeProcessOperations {
    fn execute_command(&self, cmd: &PlatformCommand) -> Result<CommandOutput, PlatformError> {
        let start = Instant::now();

        let output = build_command(cmd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(cmd, &e))?;

        debug!(
            command = %cmd,
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "command finished"
        );

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn run_interactive(&self, cmd: &PlatformCommand) -> Result<CommandOutput, PlatformError> {
        debug!(command = %cmd, "running interactive command");

        let status = build_command(cmd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_error(cmd, &e))?;

        Ok(CommandOutput {
            code: status.code(),
            ..CommandOutput::default()
        })
    }
}
