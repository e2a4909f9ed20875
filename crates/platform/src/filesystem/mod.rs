//! Filesystem operations used by the installer

use cpr_errors::PlatformError;
use std::path::Path;

/// Trait for the filesystem operations the installer performs
///
/// Every mutating call reports permission refusals as
/// [`PlatformError::PermissionDenied`] so callers can decide whether to escalate.
pub trait FilesystemOperations: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Probe whether the current user may create files in `dir`
    fn check_writable(&self, dir: &Path) -> Result<(), PlatformError>;

    /// Copy `src` over `dst`, returning the number of bytes written
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64, PlatformError>;

    /// Set Unix permission bits; a no-op on hosts without them
    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), PlatformError>;

    /// Create or truncate `path` with `contents`
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), PlatformError>;
}
