//! Native filesystem operations implementation

use cpr_errors::PlatformError;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::filesystem::FilesystemOperations;

/// Filesystem operations on the real host filesystem
pub struct NativeFilesystemOperations;

impl NativeFilesystemOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeFilesystemOperations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn probe_writable(dir: &Path) -> Result<(), PlatformError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(dir.as_os_str().as_bytes()).map_err(|_| {
        PlatformError::FilesystemOperationFailed {
            operation: "check_writable".to_string(),
            path: dir.display().to_string(),
            message: "path contains an interior NUL byte".to_string(),
        }
    })?;

    // SAFETY: c_path is a valid NUL-terminated string that outlives the call
    let rc = unsafe { libc::access(c_path.as_ptr(), libc::W_OK) };
    if rc == 0 {
        Ok(())
    } else {
        let err = std::io::Error::last_os_error();
        Err(PlatformError::from_io("check_writable", dir, &err))
    }
}

#[cfg(not(unix))]
fn probe_writable(dir: &Path) -> Result<(), PlatformError> {
    let metadata =
        fs::metadata(dir).map_err(|e| PlatformError::from_io("check_writable", dir, &e))?;

    if metadata.permissions().readonly() {
        return Err(PlatformError::PermissionDenied {
            operation: "check_writable".to_string(),
            path: dir.display().to_string(),
            message: "directory is read-only".to_string(),
        });
    }
    Ok(())
}

impl FilesystemOperations for NativeFilesystemOperations {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn check_writable(&self, dir: &Path) -> Result<(), PlatformError> {
        probe_writable(dir)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64, PlatformError> {
        let bytes = fs::copy(src, dst).map_err(|e| PlatformError::from_io("copy_file", dst, &e))?;
        debug!(src = %src.display(), dst = %dst.display(), bytes, "copied file");
        Ok(bytes)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), PlatformError> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| PlatformError::from_io("set_mode", path, &e))?;
        debug!(path = %path.display(), mode = %format!("{mode:o}"), "set permissions");
        Ok(())
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, _mode: u32) -> Result<(), PlatformError> {
        debug!(path = %path.display(), "permission bits not supported on this host");
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), PlatformError> {
        fs::write(path, contents).map_err(|e| PlatformError::from_io("write_file", path, &e))
    }
}
