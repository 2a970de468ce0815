//! Configuration type definitions

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LayersResult;
use crate::logger::{LogLevels, Logger};

use super::env::{EnvSnapshot, DEBUG_ENV};
use super::loader::{self, FUNCTION_METADATA_FILE};
use crate::domain::value_objects::ConfigWarning;

/// Function metadata from `<app>/riff.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    /// Path to the main function artifact (a jar, an executable)
    #[serde(default)]
    pub artifact: String,

    /// Finer grained handler within the artifact, such as a class name
    #[serde(default)]
    pub handler: String,

    /// Forces a language and bypasses detection
    #[serde(default, rename = "override")]
    pub language_override: String,
}

impl FunctionMetadata {
    /// Load `riff.toml` and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> LayersResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment overrides (`RIFF_*`)
    pub fn with_env_overrides(self, env: &EnvSnapshot) -> Self {
        loader::with_env_overrides(self, env)
    }

    /// Load the metadata for the application at `app_root`
    ///
    /// A missing file yields defaults. Unknown keys are reported as warnings
    /// and the environment is applied on top.
    pub fn resolve(app_root: &Path, env: &EnvSnapshot, logger: &Logger) -> LayersResult<Self> {
        let path = app_root.join(FUNCTION_METADATA_FILE);
        let (metadata, warnings) = Self::load_with_warnings(&path)?;

        for warning in &warnings {
            match warning.line {
                Some(line) => logger.warning(format_args!(
                    "unknown key '{}' in {}:{}",
                    warning.key,
                    warning.file.display(),
                    line
                )),
                None => logger.warning(format_args!(
                    "unknown key '{}' in {}",
                    warning.key,
                    warning.file.display()
                )),
            }
        }

        let metadata = metadata.with_env_overrides(env);
        logger.debug(format_args!("riff metadata: {}", metadata));
        Ok(metadata)
    }
}

impl fmt::Display for FunctionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "artifact: {}, handler: {}, override: {}",
            self.artifact, self.handler, self.language_override
        )
    }
}

/// Enabled log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
    pub info: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            info: true,
        }
    }
}

impl LogConfig {
    /// Debug output is enabled when `BP_DEBUG` is set and non-empty
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            debug: env.non_empty(DEBUG_ENV).is_some(),
            ..Self::default()
        }
    }

    pub fn logger(&self) -> Logger {
        Logger::from_levels(self)
    }
}

impl LogLevels for LogConfig {
    fn is_debug_enabled(&self) -> bool {
        self.debug
    }

    fn is_info_enabled(&self) -> bool {
        self.info
    }
}
