//! In-memory file system for tests
//!
//! Uses `Arc<Mutex<>>` internally so it can be cloned and shared between a
//! store and the assertions made on it.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    locked: HashSet<PathBuf>,
    vanishing: HashSet<PathBuf>,
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<State>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: &str) {
        let path = path.into();
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            state.dirs.insert(parent.to_path_buf());
        }
        state.files.insert(path, content.to_string());
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().dirs.insert(path.into());
    }

    /// Make every removal of `path` fail with permission denied
    pub fn lock_path(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().locked.insert(path.into());
    }

    /// Have `path` disappear just before it is removed, as if another
    /// process got there first; the removal reports not found
    pub fn vanish_on_remove(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().vanishing.insert(path.into());
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.file(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.add_file(path, content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked.contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        if state.vanishing.remove(path) {
            state.files.remove(path);
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked.contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        if state.vanishing.remove(path) {
            state.dirs.retain(|d| !d.starts_with(path));
            state.files.retain(|f, _| !f.starts_with(path));
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        if !state.dirs.contains(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.add_dir(path);
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        if !state.dirs.contains(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(state
            .files
            .keys()
            .filter(|f| f.parent() == Some(dir))
            .cloned()
            .collect())
    }
}
