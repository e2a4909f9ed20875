//! Platform abstraction layer for the cpr installer.
//!
//! This crate provides a unified interface for the host operations the
//! installer depends on:
//! - Filesystem operations (existence checks, write probes, copy, permissions)
//! - Process execution, both captured and attached to the terminal
//!
//! Both are traits so the installer can be driven by fakes in tests.

pub mod core;
pub mod filesystem;
pub mod implementations;
pub mod process;

pub use crate::core::Platform;
pub use cpr_types::HostOs;
pub use implementations::native::{NativeFilesystemOperations, NativeProcessOperations};

/// Re-export commonly used types
pub use filesystem::FilesystemOperations;
pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
