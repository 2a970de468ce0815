//! Layer store
//!
//! A layers root holds one directory and one `<name>.toml` record per layer,
//! plus the well-known descriptors (`app.toml`, `launch.toml`,
//! `store.toml`). A run registers the layers it produces, contributes each
//! of them, then cleans up whatever it did not register.
//!
//! One store is expected to own its root for the duration of a run; no
//! lock is taken.

mod layer;
mod touched;

use std::path::{Path, PathBuf};

use toml::Table;

pub use layer::{EnvOp, EnvScope, Layer};
pub use touched::TouchedLayers;

use crate::domain::entities::ApplicationMetadata;
use crate::domain::ports::{FileSystem, MetadataError, MetadataRepository};
use crate::domain::services::process_type_lines;
use crate::domain::value_objects::{LayerName, APPLICATION_METADATA_FILE, STORE_METADATA_FILE};
use crate::error::{LayersError, LayersResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::TomlMetadataRepository;
use crate::logger::Logger;

/// Root directory of a build's layers
#[derive(Debug)]
pub struct LayerStore<FS: FileSystem + Clone = LocalFs> {
    root: PathBuf,
    fs: FS,
    repository: TomlMetadataRepository<FS>,
    touched: TouchedLayers<FS>,
    logger: Logger,
}

impl LayerStore<LocalFs> {
    pub fn new(root: impl Into<PathBuf>, logger: Logger) -> Self {
        Self::with_fs(root, LocalFs::new(), logger)
    }
}

impl<FS: FileSystem + Clone> LayerStore<FS> {
    pub fn with_fs(root: impl Into<PathBuf>, fs: FS, logger: Logger) -> Self {
        let root = root.into();
        Self {
            touched: TouchedLayers::with_fs(root.clone(), fs.clone(), logger.clone()),
            repository: TomlMetadataRepository::with_fs(fs.clone()),
            root,
            fs,
            logger,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Create a handle for `name` and mark it live for this run
    ///
    /// Nothing is read or written. Registering the same name twice yields
    /// equivalent handles.
    pub fn register_layer(&self, name: &str) -> LayersResult<Layer<FS>> {
        let name = LayerName::new(name)?;
        let layer = Layer::new(&self.root, name, self.fs.clone(), self.logger.clone());
        self.touched.add(layer.metadata_path());
        Ok(layer)
    }

    /// Layers registered so far; call [`TouchedLayers::cleanup`] once every
    /// layer has been registered
    pub fn touched_layers(&self) -> &TouchedLayers<FS> {
        &self.touched
    }

    /// Log the process types and slice count, then write `app.toml`
    pub fn write_application_metadata(&self, metadata: &ApplicationMetadata) -> LayersResult<()> {
        metadata.validate()?;

        if !metadata.processes.is_empty() {
            self.logger.first_line("Process types:");
            for line in process_type_lines(&metadata.processes) {
                self.logger.subsequent_line(line);
            }
        }

        if !metadata.slices.is_empty() {
            self.logger
                .first_line(format_args!("{} application slices", metadata.slices.len()));
        }

        let path = self.root.join(APPLICATION_METADATA_FILE);
        self.repository
            .save_application(&path, metadata)
            .map_err(|source| LayersError::Persistence { path, source })
    }

    /// The `[metadata]` table of `store.toml`; empty when there is none
    pub fn read_store_metadata(&self) -> LayersResult<Table> {
        let path = self.root.join(STORE_METADATA_FILE);
        self.repository.load_store(&path).map_err(|e| match e {
            MetadataError::InvalidFormat(reason) => LayersError::ConfigInvalid { path, reason },
            source => LayersError::Persistence { path, source },
        })
    }

    pub fn write_store_metadata(&self, metadata: &Table) -> LayersResult<()> {
        let path = self.root.join(STORE_METADATA_FILE);
        self.repository
            .save_store(&path, metadata)
            .map_err(|source| LayersError::Persistence { path, source })
    }
}
