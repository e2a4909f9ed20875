//! Fake collaborators shared by the install tests

#![allow(dead_code)]

use cpr_errors::PlatformError;
use cpr_install::{EventSink, InstallEvent};
use cpr_platform::{CommandOutput, FilesystemOperations, PlatformCommand, ProcessOperations};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct MemoryState {
    pub files: HashMap<PathBuf, Vec<u8>>,
    pub modes: HashMap<PathBuf, u32>,
    pub dirs: HashSet<PathBuf>,
    pub read_only: HashSet<PathBuf>,
    /// Every mutating call, in order
    pub mutations: Vec<String>,
    /// Make `copy_file` fail with a non-permission error
    pub copy_error: Option<String>,
    /// Directories that pass the write probe but refuse the copy itself
    pub copy_denied: HashSet<PathBuf>,
    /// Paths whose mode cannot be changed
    pub mode_denied: HashSet<PathBuf>,
    /// Make `write_file` fail
    pub write_error: Option<String>,
}

impl MemoryState {
    fn copy(&mut self, src: &Path, dst: &Path) -> Result<u64, PlatformError> {
        let data = self
            .files
            .get(src)
            .cloned()
            .ok_or_else(|| PlatformError::FilesystemOperationFailed {
                operation: "copy_file".into(),
                path: src.display().to_string(),
                message: "No such file or directory".into(),
            })?;
        let len = data.len() as u64;
        self.files.insert(dst.to_path_buf(), data);
        Ok(len)
    }
}

/// In-memory filesystem; clones share state
#[derive(Clone, Default)]
pub struct MemoryFs {
    pub state: Arc<Mutex<MemoryState>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, contents: &[u8]) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(PathBuf::from(path), contents.to_vec());
        self
    }

    pub fn with_dir(self, path: &str) -> Self {
        self.state.lock().unwrap().dirs.insert(PathBuf::from(path));
        self
    }

    pub fn with_read_only_dir(self, path: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.dirs.insert(PathBuf::from(path));
            state.read_only.insert(PathBuf::from(path));
        }
        self
    }

    pub fn with_copy_error(self, message: &str) -> Self {
        self.state.lock().unwrap().copy_error = Some(message.to_string());
        self
    }

    /// Probe says writable, copy is refused anyway
    pub fn with_copy_denied_dir(self, path: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.dirs.insert(PathBuf::from(path));
            state.copy_denied.insert(PathBuf::from(path));
        }
        self
    }

    pub fn with_mode_denied(self, path: &str) -> Self {
        self.state.lock().unwrap().mode_denied.insert(PathBuf::from(path));
        self
    }

    pub fn with_write_error(self, message: &str) -> Self {
        self.state.lock().unwrap().write_error = Some(message.to_string());
        self
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(Path::new(path)).cloned()
    }

    pub fn mode(&self, path: &str) -> Option<u32> {
        self.state.lock().unwrap().modes.get(Path::new(path)).copied()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.state.lock().unwrap().dirs.contains(Path::new(path))
    }

    pub fn mutations(&self) -> Vec<String> {
        self.state.lock().unwrap().mutations.clone()
    }

    fn denied(operation: &str, path: &Path) -> PlatformError {
        PlatformError::PermissionDenied {
            operation: operation.into(),
            path: path.display().to_string(),
            message: "Permission denied (os error 13)".into(),
        }
    }
}

impl FilesystemOperations for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn check_writable(&self, dir: &Path) -> Result<(), PlatformError> {
        if self.state.lock().unwrap().read_only.contains(dir) {
            return Err(Self::denied("check_writable", dir));
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64, PlatformError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.copy_error.clone() {
            return Err(PlatformError::FilesystemOperationFailed {
                operation: "copy_file".into(),
                path: dst.display().to_string(),
                message,
            });
        }
        if let Some(parent) = dst.parent() {
            if state.read_only.contains(parent) || state.copy_denied.contains(parent) {
                return Err(Self::denied("copy_file", dst));
            }
        }
        state.mutations.push(format!("copy {} {}", src.display(), dst.display()));
        state.copy(src, dst)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if state.mode_denied.contains(path) {
            return Err(Self::denied("set_mode", path));
        }
        state.mutations.push(format!("chmod {mode:o} {}", path.display()));
        state.modes.insert(path.to_path_buf(), mode);
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.write_error.clone() {
            return Err(PlatformError::FilesystemOperationFailed {
                operation: "write_file".into(),
                path: path.display().to_string(),
                message,
            });
        }
        state.mutations.push(format!("write {}", path.display()));
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}

type Responder = dyn Fn(&PlatformCommand) -> Result<CommandOutput, PlatformError> + Send + Sync;

/// Process runner that records commands and answers from a closure
#[derive(Clone)]
pub struct FakeProcess {
    pub captured: Arc<Mutex<Vec<String>>>,
    pub interactive: Arc<Mutex<Vec<String>>>,
    responder: Arc<Responder>,
}

impl FakeProcess {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&PlatformCommand) -> Result<CommandOutput, PlatformError> + Send + Sync + 'static,
    {
        Self {
            captured: Arc::default(),
            interactive: Arc::default(),
            responder: Arc::new(responder),
        }
    }

    /// Every command exits 0 with no output
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(CommandOutput::with_code(0)))
    }

    /// Every command exits 1
    pub fn failing() -> Self {
        Self::new(|_| Ok(CommandOutput::with_code(1)))
    }

    /// Commands fail to spawn at all
    pub fn missing() -> Self {
        Self::new(|cmd| {
            Err(PlatformError::ProcessExecutionFailed {
                command: cmd.program().to_string(),
                message: "program not found".into(),
            })
        })
    }

    /// `sudo cp` and `sudo chmod` applied to `fs` as if they had root
    pub fn elevating(fs: MemoryFs) -> Self {
        Self::new(move |cmd| {
            let args = cmd.get_args();
            let mut state = fs.state.lock().unwrap();
            match args.first().map(String::as_str) {
                Some("cp") => {
                    state.copy(Path::new(&args[1]), Path::new(&args[2]))?;
                }
                Some("chmod") => {
                    let mode = u32::from_str_radix(&args[1], 8).unwrap();
                    state.modes.insert(PathBuf::from(&args[2]), mode);
                }
                _ => return Ok(CommandOutput::with_code(1)),
            }
            Ok(CommandOutput::with_code(0))
        })
    }

    pub fn captured(&self) -> Vec<String> {
        self.captured.lock().unwrap().clone()
    }

    pub fn interactive(&self) -> Vec<String> {
        self.interactive.lock().unwrap().clone()
    }
}

impl ProcessOperations for FakeProcess {
    fn execute_command(&self, cmd: &PlatformCommand) -> Result<CommandOutput, PlatformError> {
        self.captured.lock().unwrap().push(cmd.to_string());
        (self.responder)(cmd)
    }

    fn run_interactive(&self, cmd: &PlatformCommand) -> Result<CommandOutput, PlatformError> {
        self.interactive.lock().unwrap().push(cmd.to_string());
        (self.responder)(cmd)
    }
}

/// Collects emitted events
#[derive(Default)]
pub struct RecordingSink {
    pub events: RefCell<Vec<InstallEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<InstallEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: InstallEvent) {
        self.events.borrow_mut().push(event);
    }
}
