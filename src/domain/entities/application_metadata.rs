//! Application metadata entity
//!
//! Cross-cutting metadata a buildpack declares about the application as a
//! whole: the process types it can be launched with, and the slices the
//! application directory is partitioned into.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LayersError, LayersResult};

/// A launchable process type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "type")]
    pub process_type: String,
    pub command: String,
}

impl Process {
    pub fn new(process_type: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            process_type: process_type.into(),
            command: command.into(),
        }
    }
}

/// An application slice; only the number of slices is ever reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationMetadata {
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub slices: Vec<Slice>,
}

impl ApplicationMetadata {
    pub fn with_process(mut self, process_type: impl Into<String>, command: impl Into<String>) -> Self {
        self.processes.push(Process::new(process_type, command));
        self
    }

    pub fn with_slice(mut self, slice: Slice) -> Self {
        self.slices.push(slice);
        self
    }

    /// Process types must be unique
    pub fn validate(&self) -> LayersResult<()> {
        let mut seen = HashSet::new();
        for process in &self.processes {
            if !seen.insert(process.process_type.as_str()) {
                return Err(LayersError::DuplicateProcessType(
                    process.process_type.clone(),
                ));
            }
        }
        Ok(())
    }
}
