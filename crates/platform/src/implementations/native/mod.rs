//! Implementation backed by the standard library and the host OS

pub mod filesystem;
pub mod process;

pub use filesystem::NativeFilesystemOperations;
pub use process::NativeProcessOperations;
