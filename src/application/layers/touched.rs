//! Touched layer registry
//!
//! Every layer registered during a run is recorded here. Cleanup removes
//! the metadata file (and directory) of every layer under the root that was
//! not registered, leaving the well-known descriptors alone.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::{METADATA_EXTENSION, PROTECTED_FILENAMES};
use crate::error::{CleanupFailures, LayersError, LayersResult};
use crate::infrastructure::fs::LocalFs;
use crate::logger::Logger;

#[derive(Debug, Default)]
struct Registry {
    paths: HashSet<PathBuf>,
    cleaned: bool,
}

/// Metadata files referenced during the current run
#[derive(Debug)]
pub struct TouchedLayers<FS: FileSystem = LocalFs> {
    root: PathBuf,
    fs: FS,
    logger: Logger,
    registry: Mutex<Registry>,
}

impl TouchedLayers<LocalFs> {
    pub fn new(root: impl Into<PathBuf>, logger: Logger) -> Self {
        Self::with_fs(root, LocalFs::new(), logger)
    }
}

impl<FS: FileSystem> TouchedLayers<FS> {
    pub fn with_fs(root: impl Into<PathBuf>, fs: FS, logger: Logger) -> Self {
        Self {
            root: root.into(),
            fs,
            logger,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Mark a metadata file as live for this run
    pub fn add(&self, path: impl Into<PathBuf>) {
        self.lock().paths.insert(path.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().paths.contains(path)
    }

    /// Delete every layer under the root that was not touched
    ///
    /// Only `*.toml` files directly under the root are considered. Removal
    /// failures do not stop the pass; they are collected and returned
    /// together once every candidate has been tried. Runs at most once.
    pub fn cleanup(&self) -> LayersResult<()> {
        let touched = {
            let mut registry = self.lock();
            if registry.cleaned {
                return Ok(());
            }
            registry.cleaned = true;
            std::mem::take(&mut registry.paths)
        };

        let files = match self.fs.list_files(&self.root) {
            Ok(files) => files,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => {
                let mut failures = CleanupFailures::default();
                failures.push(self.root.clone(), e);
                return Err(LayersError::Cleanup(failures));
            }
        };

        let mut failures = CleanupFailures::default();
        for file in files {
            if !is_stale(&file, &touched) {
                continue;
            }

            self.logger
                .debug(format_args!("Removing stale layer {}", file.display()));
            tracing::debug!(path = %file.display(), "removing untouched layer");

            if let Err(e) = ignore_missing(self.fs.remove(&file)) {
                failures.push(file.clone(), e);
            }

            let dir = file.with_extension("");
            if self.fs.exists(&dir) {
                if let Err(e) = ignore_missing(self.fs.remove_dir_all(&dir)) {
                    failures.push(dir, e);
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            tracing::warn!(count = failures.len(), "stale layers left behind");
            Err(LayersError::Cleanup(failures))
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_stale(file: &Path, touched: &HashSet<PathBuf>) -> bool {
    let is_metadata = file
        .extension()
        .is_some_and(|ext| ext == METADATA_EXTENSION);
    let is_protected = file
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| PROTECTED_FILENAMES.contains(&name));

    is_metadata && !is_protected && !touched.contains(file)
}

fn ignore_missing(result: Result<(), FsError>) -> Result<(), FsError> {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}
