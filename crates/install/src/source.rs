//! Locating the script shipped alongside the installer

use cpr_errors::{Error, InstallError};
use std::path::PathBuf;

/// Path of `script_name` in the directory holding the running executable
///
/// # Errors
///
/// Returns an error if the current executable cannot be determined.
pub fn default_source_path(script_name: &str) -> Result<PathBuf, Error> {
    let exe = std::env::current_exe()
        .map_err(|e| Error::internal(format!("cannot locate the installer executable: {e}")))?;

    let dir = exe.parent().ok_or_else(|| InstallError::SourceNotFound {
        path: exe.display().to_string(),
    })?;

    Ok(dir.join(script_name))
}
