//! MetadataRepository port - abstraction for layer metadata persistence
//!
//! The layer store loads and saves records through this trait without
//! knowing about TOML serialization details.

use std::path::Path;

use toml::Table;

use super::file_system::FsError;
use crate::domain::entities::{ApplicationMetadata, LayerMetadata};

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Metadata operation errors
#[derive(Debug)]
pub enum MetadataError {
    /// Record exists but cannot be decoded
    InvalidFormat(String),
    /// Record cannot be encoded
    Serialize(String),
    /// Underlying file system failure
    Fs(FsError),
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::InvalidFormat(msg) => write!(f, "Invalid metadata format: {}", msg),
            MetadataError::Serialize(msg) => write!(f, "Cannot serialize metadata: {}", msg),
            MetadataError::Fs(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetadataError::Fs(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FsError> for MetadataError {
    fn from(err: FsError) -> Self {
        MetadataError::Fs(err)
    }
}

/// Abstract repository for the metadata files under a layers root
pub trait MetadataRepository {
    /// Load a layer record; `Ok(None)` when no record exists
    fn load_layer(&self, path: &Path) -> MetadataResult<Option<LayerMetadata>>;

    /// Save a layer record
    fn save_layer(&self, path: &Path, metadata: &LayerMetadata) -> MetadataResult<()>;

    /// Save the application metadata record
    fn save_application(&self, path: &Path, metadata: &ApplicationMetadata) -> MetadataResult<()>;

    /// Load the persistent store table; empty when no record exists
    fn load_store(&self, path: &Path) -> MetadataResult<Table>;

    /// Save the persistent store table
    fn save_store(&self, path: &Path, metadata: &Table) -> MetadataResult<()>;
}
