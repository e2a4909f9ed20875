//! Core platform abstraction

use crate::filesystem::FilesystemOperations;
use crate::process::ProcessOperations;

/// Main platform abstraction providing access to all platform operations
pub struct Platform {
    filesystem_ops: Box<dyn FilesystemOperations>,
    process_ops: Box<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementations
    pub fn new(
        filesystem_ops: Box<dyn FilesystemOperations>,
        process_ops: Box<dyn ProcessOperations>,
    ) -> Self {
        Self {
            filesystem_ops,
            process_ops,
        }
    }

    /// Platform backed by the real filesystem and real subprocesses
    pub fn current() -> Self {
        use crate::implementations::native::{
            NativeFilesystemOperations, NativeProcessOperations,
        };

        Self::new(
            Box::new(NativeFilesystemOperations::new()),
            Box::new(NativeProcessOperations::new()),
        )
    }

    /// Access filesystem operations
    pub fn filesystem(&self) -> &dyn FilesystemOperations {
        &*self.filesystem_ops
    }

    /// Access process operations
    pub fn process(&self) -> &dyn ProcessOperations {
        &*self.process_ops
    }
}
