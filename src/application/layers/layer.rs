//! Layer handle and the contribution protocol

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::entities::{DesiredLayer, LayerState};
use crate::domain::ports::{FileSystem, FsError, MetadataError, MetadataRepository};
use crate::domain::services::{ContributionPlanner, PersistedRecord};
use crate::domain::value_objects::{ContributionDecision, LayerName};
use crate::error::{LayersError, LayersResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::TomlMetadataRepository;
use crate::logger::{Identifiable, Logger};

/// Which phase an environment file applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvScope {
    /// Both build and launch (`env/`)
    All,
    /// Subsequent buildpacks only (`env.build/`)
    Build,
    /// The launched application only (`env.launch/`)
    Launch,
}

impl EnvScope {
    fn directory(self) -> &'static str {
        match self {
            EnvScope::All => "env",
            EnvScope::Build => "env.build",
            EnvScope::Launch => "env.launch",
        }
    }
}

/// How an environment file modifies its variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvOp {
    Override,
    Default,
    Append,
    Prepend,
    Delim,
}

impl EnvOp {
    fn suffix(self) -> &'static str {
        match self {
            EnvOp::Override => "override",
            EnvOp::Default => "default",
            EnvOp::Append => "append",
            EnvOp::Prepend => "prepend",
            EnvOp::Delim => "delim",
        }
    }
}

/// One cache unit: `<root>/<name>/` plus `<root>/<name>.toml`
///
/// Handles are cheap views created by
/// [`LayerStore::register_layer`](super::LayerStore::register_layer).
pub struct Layer<FS: FileSystem + Clone = LocalFs> {
    name: LayerName,
    root: PathBuf,
    metadata_path: PathBuf,
    state: LayerState,
    fs: FS,
    repository: TomlMetadataRepository<FS>,
    logger: Logger,
}

impl<FS: FileSystem + Clone> Layer<FS> {
    pub(crate) fn new(layers_root: &Path, name: LayerName, fs: FS, logger: Logger) -> Self {
        Self {
            root: layers_root.join(name.as_str()),
            metadata_path: layers_root.join(name.metadata_file_name()),
            name,
            state: LayerState::default(),
            repository: TomlMetadataRepository::with_fs(fs.clone()),
            fs,
            logger,
        }
    }

    pub fn name(&self) -> &LayerName {
        &self.name
    }

    /// The layer directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Bring the layer to `desired`, running `action` only when its contents
    /// are stale
    ///
    /// The action receives this handle and fills [`Layer::root`]. When it
    /// fails the layer is marked [`LayerState::Failed`], no record is left
    /// behind and the action's error is returned as the source of
    /// [`LayersError::Contribution`].
    pub fn contribute<F>(&mut self, desired: &DesiredLayer, action: F) -> LayersResult<ContributionDecision>
    where
        F: FnOnce(&mut Layer<FS>) -> anyhow::Result<()>,
    {
        let persisted = self.read_record();
        let decision = ContributionPlanner::plan(&persisted, desired);
        self.state = LayerState::Evaluated;
        tracing::debug!(layer = %self.name, %decision, "evaluated layer");

        let label = match desired.identity() {
            Some(identity) => Logger::pretty_identity(&identity),
            None => Logger::pretty_identity(&*self),
        };

        if !decision.requires_action() {
            self.logger
                .first_line(format_args!("{}: Reusing cached layer", label));
            if decision.requires_write() {
                self.write_record(desired)?;
            }
            self.state = LayerState::Built;
            return Ok(decision);
        }

        self.logger
            .first_line(format_args!("{}: Contributing to layer", label));
        self.prepare_directory(persisted.existed())?;

        if let Err(source) = action(&mut *self) {
            self.state = LayerState::Failed;
            tracing::debug!(layer = %self.name, "contribution action failed");
            return Err(LayersError::Contribution {
                layer: self.name.to_string(),
                source,
            });
        }

        self.write_record(desired)?;
        self.state = LayerState::Built;
        Ok(decision)
    }

    /// Write `<layer>/env[.build|.launch]/<NAME>.<op>`
    pub fn write_env(&self, scope: EnvScope, op: EnvOp, name: &str, value: &str) -> LayersResult<()> {
        let dir = self.root.join(scope.directory());
        let file = format!("{}.{}", name, op.suffix());
        self.write_file(&dir, &file, value)
    }

    /// Write `<layer>/profile.d/<name>`, sourced at launch
    pub fn write_profile(&self, name: &str, script: &str) -> LayersResult<()> {
        let dir = self.root.join("profile.d");
        self.write_file(&dir, name, script)
    }

    fn read_record(&self) -> PersistedRecord {
        match self.repository.load_layer(&self.metadata_path) {
            Ok(None) => PersistedRecord::Missing,
            Ok(Some(metadata)) => PersistedRecord::Present(metadata),
            Err(e) => {
                self.logger.debug(format_args!(
                    "Ignoring unreadable layer metadata {}: {}",
                    self.metadata_path.display(),
                    e
                ));
                tracing::debug!(path = %self.metadata_path.display(), error = %e, "corrupt layer record");
                PersistedRecord::Corrupt(e.to_string())
            }
        }
    }

    fn write_record(&self, desired: &DesiredLayer) -> LayersResult<()> {
        self.repository
            .save_layer(&self.metadata_path, &desired.to_metadata())
            .map_err(|source| LayersError::Persistence {
                path: self.metadata_path.clone(),
                source,
            })
    }

    /// A prior contribution may have left partial contents, so its record
    /// is dropped and its directory cleared; otherwise whatever is there is
    /// kept.
    fn prepare_directory(&self, clear: bool) -> LayersResult<()> {
        if clear {
            // record goes first so a failure below never leaves a stale hit
            if let Err(e) = self.fs.remove(&self.metadata_path) {
                if !e.is_not_found() {
                    return Err(LayersError::Persistence {
                        path: self.metadata_path.clone(),
                        source: MetadataError::Fs(e),
                    });
                }
            }
            match self.fs.remove_dir_all(&self.root) {
                Err(e) if !e.is_not_found() => return Err(self.fs_error(e)),
                _ => {}
            }
        }
        self.fs
            .create_dir_all(&self.root)
            .map_err(|e| self.fs_error(e))
    }

    fn write_file(&self, dir: &Path, file: &str, content: &str) -> LayersResult<()> {
        let path = dir.join(file);
        if file.is_empty() || file.contains(|c| c == '/' || c == '\\') || file == "." || file == ".." {
            return Err(LayersError::PathEscape {
                path,
                root: dir.to_path_buf(),
            });
        }
        self.fs
            .write(&path, content)
            .map_err(|e| LayersError::Persistence {
                path,
                source: MetadataError::Fs(e),
            })
    }

    fn fs_error(&self, e: FsError) -> LayersError {
        LayersError::Persistence {
            path: self.root.clone(),
            source: MetadataError::Fs(e),
        }
    }
}

impl<FS: FileSystem + Clone> Identifiable for Layer<FS> {
    fn identity(&self) -> (&str, &str) {
        (self.name.as_str(), "")
    }
}

impl<FS: FileSystem + Clone> fmt::Debug for Layer<FS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("metadata_path", &self.metadata_path)
            .field("state", &self.state)
            .finish()
    }
}
