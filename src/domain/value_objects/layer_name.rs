//! Layer name value object
//!
//! A layer's name doubles as a file name under the store root: the layer
//! lives in `<root>/<name>/` and its metadata in `<root>/<name>.toml`.

use std::fmt;

use crate::domain::value_objects::PROTECTED_FILENAMES;
use crate::error::{LayersError, LayersResult};

/// Extension of every layer metadata file
pub const METADATA_EXTENSION: &str = "toml";

/// Validated layer identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerName(String);

impl LayerName {
    /// Validate `name` for use as a layer identifier
    pub fn new(name: impl Into<String>) -> LayersResult<Self> {
        let name = name.into();
        if let Some(reason) = Self::rejection(&name) {
            return Err(LayersError::InvalidLayerName { name, reason });
        }
        Ok(Self(name))
    }

    fn rejection(name: &str) -> Option<&'static str> {
        if name.is_empty() {
            return Some("name is empty");
        }
        if name.contains(|c| c == '/' || c == '\\') {
            return Some("contains a path separator");
        }
        if name.contains('\0') {
            return Some("contains a NUL byte");
        }
        if name == "." || name == ".." {
            return Some("is a relative path component");
        }
        let file_name = format!("{}.{}", name, METADATA_EXTENSION);
        if PROTECTED_FILENAMES.contains(&file_name.as_str()) {
            return Some("collides with a reserved metadata file");
        }
        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this layer's metadata record, e.g. `jdk.toml`
    pub fn metadata_file_name(&self) -> String {
        format!("{}.{}", self.0, METADATA_EXTENSION)
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for LayerName {
    type Error = LayersError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
