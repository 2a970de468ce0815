//! Error types for buildlayers
//!
//! Uses `thiserror` for library errors. Contribution actions supplied by
//! callers report their own failures through `anyhow`, and those errors are
//! carried through unchanged as the source of [`LayersError::Contribution`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, MetadataError};

/// Result type alias for buildlayers operations
pub type LayersResult<T> = Result<T, LayersError>;

/// Main error type for buildlayers operations
#[derive(Error, Debug)]
pub enum LayersError {
    /// Layer identifier cannot be used as a file name under the store root
    #[error("invalid layer name '{name}': {reason}")]
    InvalidLayerName { name: String, reason: &'static str },

    /// Metadata could not be serialized or written
    #[error("failed to persist {path}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    /// The caller-supplied contribution action failed
    #[error("failed to contribute layer '{layer}'")]
    Contribution {
        layer: String,
        #[source]
        source: anyhow::Error,
    },

    /// One or more stale layers could not be removed
    #[error("failed to clean up stale layers: {0}")]
    Cleanup(CleanupFailures),

    /// Two processes share the same type
    #[error("duplicate process type '{0}'")]
    DuplicateProcessType(String),

    /// A configuration file exists but cannot be decoded
    #[error("invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Service binding document is malformed
    #[error("invalid service bindings: {0}")]
    Bindings(#[from] serde_json::Error),

    /// Archive could not be opened or read
    #[error("failed to read archive {path}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Path escapes the directory it must stay inside
    #[error("path '{path}' escapes '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// IO error with context
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl LayersError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// The error returned by a failed contribution action, if this is one
    pub fn contribution_source(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Contribution { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A single stale layer file that could not be removed
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub source: FsError,
}

/// Every removal failure collected during one cleanup pass
#[derive(Debug, Default)]
pub struct CleanupFailures(Vec<CleanupFailure>);

impl CleanupFailures {
    pub fn push(&mut self, path: PathBuf, source: FsError) {
        self.0.push(CleanupFailure { path, source });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CleanupFailure> {
        self.0.iter()
    }
}

impl fmt::Display for CleanupFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", failure.path.display(), failure.source)?;
        }
        Ok(())
    }
}
