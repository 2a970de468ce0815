//! Configuration module for buildlayers
//!
//! Resolution order, lowest priority first:
//! 1. Built-in defaults
//! 2. Application metadata file (`<app>/riff.toml`)
//! 3. Environment snapshot (`RIFF_*`, `BP_DEBUG`)
//!
//! The environment is captured once into an [`EnvSnapshot`] and passed
//! explicitly, so resolution never reads process state on its own.

mod env;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use env::{EnvSnapshot, ARTIFACT_ENV, DEBUG_ENV, HANDLER_ENV, OVERRIDE_ENV};
pub use loader::{load_with_warnings, with_env_overrides, FUNCTION_METADATA_FILE};
pub use types::{FunctionMetadata, LogConfig};
