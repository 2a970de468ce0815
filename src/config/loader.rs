//! Configuration loading

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::value_objects::ConfigWarning;
use crate::error::{LayersError, LayersResult};

use super::env::{EnvSnapshot, ARTIFACT_ENV, HANDLER_ENV, OVERRIDE_ENV};
use super::types::FunctionMetadata;

/// Function metadata file name under the application root
pub const FUNCTION_METADATA_FILE: &str = "riff.toml";

/// Load function metadata and collect non-fatal warnings (e.g. unknown keys).
///
/// A missing file yields defaults.
pub fn load_with_warnings(path: &Path) -> LayersResult<(FunctionMetadata, Vec<ConfigWarning>)> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok((FunctionMetadata::default(), Vec::new()))
        }
        Err(e) => return Err(LayersError::io(format!("reading {}", path.display()), e)),
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let metadata: FunctionMetadata = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| LayersError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((metadata, warnings))
}

/// Apply `RIFF_ARTIFACT`, `RIFF_HANDLER` and `RIFF_OVERRIDE`
///
/// Only non-empty values replace what the file said.
pub fn with_env_overrides(mut metadata: FunctionMetadata, env: &EnvSnapshot) -> FunctionMetadata {
    if let Some(artifact) = env.non_empty(ARTIFACT_ENV) {
        metadata.artifact = artifact.to_string();
    }
    if let Some(handler) = env.non_empty(HANDLER_ENV) {
        metadata.handler = handler.to_string();
    }
    if let Some(language) = env.non_empty(OVERRIDE_ENV) {
        metadata.language_override = language.to_string();
    }
    metadata
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}
