//! File Session Backend
//!
//! Keeps the session record in a JSON file so a running timer survives a
//! relaunch of the native client.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::state::STORE_KEY;
use super::store::{SessionBackend, SessionResult};

/// Session record stored on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Record file named after the store key inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{}.json", STORE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> SessionResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, record: &str) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename so a crash never leaves a truncated record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
