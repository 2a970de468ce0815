//! TOML Metadata Repository
//!
//! Implements the MetadataRepository port using TOML format.

use std::path::Path;

use serde::{Deserialize, Serialize};
use toml::Table;

use crate::domain::entities::{ApplicationMetadata, LayerMetadata};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::metadata_repository::{
    MetadataError, MetadataRepository, MetadataResult,
};
use crate::domain::value_objects::LayerFlags;
use crate::infrastructure::fs::LocalFs;

/// TOML-based metadata repository
///
/// Layer records are stored as `<root>/<name>.toml` with the flags at the
/// top level and the payload under `[metadata]`.
#[derive(Debug, Clone)]
pub struct TomlMetadataRepository<FS: FileSystem = LocalFs> {
    fs: FS,
}

impl TomlMetadataRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl<FS: FileSystem> TomlMetadataRepository<FS> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: FS) -> Self {
        Self { fs }
    }

    fn read_optional(&self, path: &Path) -> MetadataResult<Option<String>> {
        match self.fs.read(path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(MetadataError::Fs(err)),
        }
    }

    fn write_toml<T: Serialize>(&self, path: &Path, value: &T) -> MetadataResult<()> {
        let content = toml::to_string_pretty(value)
            .map_err(|e| MetadataError::Serialize(e.to_string()))?;
        self.fs.write(path, &content).map_err(MetadataError::from)
    }
}

impl Default for TomlMetadataRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML representation of a layer record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlLayerRecord {
    #[serde(default)]
    build: bool,
    #[serde(default)]
    cache: bool,
    #[serde(default)]
    launch: bool,
    #[serde(default)]
    metadata: Table,
}

/// TOML representation of the persistent store descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TomlStoreRecord {
    #[serde(default)]
    metadata: Table,
}

fn parse_record<T: for<'de> Deserialize<'de>>(path: &Path, content: &str) -> MetadataResult<T> {
    let deserializer = toml::de::Deserializer::new(content);
    serde_ignored::deserialize(deserializer, |key| {
        tracing::debug!(path = %path.display(), key = %key, "ignoring unknown metadata key");
    })
    .map_err(|e| MetadataError::InvalidFormat(e.to_string()))
}

impl<FS: FileSystem> MetadataRepository for TomlMetadataRepository<FS> {
    fn load_layer(&self, path: &Path) -> MetadataResult<Option<LayerMetadata>> {
        let Some(content) = self.read_optional(path)? else {
            return Ok(None);
        };

        let record: TomlLayerRecord = parse_record(path, &content)?;
        let flags = LayerFlags {
            build: record.build,
            cache: record.cache,
            launch: record.launch,
        };
        Ok(Some(LayerMetadata::new(flags, record.metadata)))
    }

    fn save_layer(&self, path: &Path, metadata: &LayerMetadata) -> MetadataResult<()> {
        let record = TomlLayerRecord {
            build: metadata.flags.build,
            cache: metadata.flags.cache,
            launch: metadata.flags.launch,
            metadata: metadata.payload.clone(),
        };
        self.write_toml(path, &record)
    }

    fn save_application(&self, path: &Path, metadata: &ApplicationMetadata) -> MetadataResult<()> {
        self.write_toml(path, metadata)
    }

    fn load_store(&self, path: &Path) -> MetadataResult<Table> {
        match self.read_optional(path)? {
            Some(content) => Ok(parse_record::<TomlStoreRecord>(path, &content)?.metadata),
            None => Ok(Table::new()),
        }
    }

    fn save_store(&self, path: &Path, metadata: &Table) -> MetadataResult<()> {
        let record = TomlStoreRecord {
            metadata: metadata.clone(),
        };
        self.write_toml(path, &record)
    }
}
