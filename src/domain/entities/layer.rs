//! Layer entities
//!
//! `LayerMetadata` is what a layer's `<name>.toml` holds. `DesiredLayer` is
//! what a buildpack wants that record to be after contribution.

use std::collections::BTreeSet;

use toml::{Table, Value};

use crate::domain::value_objects::{Fingerprint, LayerFlags};

/// Persisted layer record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerMetadata {
    pub flags: LayerFlags,
    pub payload: Table,
}

impl LayerMetadata {
    pub fn new(flags: LayerFlags, payload: Table) -> Self {
        Self { flags, payload }
    }
}

/// Lifecycle of a layer handle within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerState {
    #[default]
    Unloaded,
    Evaluated,
    Built,
    Failed,
}

/// Desired state of a layer after contribution
///
/// By default every payload key is significant. Restricting the significant
/// keys lets a buildpack store informational values (a download URL, a
/// timestamp) without invalidating the layer when only those change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredLayer {
    flags: LayerFlags,
    payload: Table,
    significant: Option<BTreeSet<String>>,
    identity: Option<(String, String)>,
}

impl DesiredLayer {
    pub fn new(payload: Table) -> Self {
        Self {
            payload,
            ..Self::default()
        }
    }

    pub fn with_flags(mut self, flags: LayerFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Insert a single payload entry
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Only compare these payload keys against the persisted record
    pub fn significant<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.significant = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Name and description shown when the layer is logged
    pub fn with_identity(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.identity = Some((name.into(), description.into()));
        self
    }

    pub fn flags(&self) -> LayerFlags {
        self.flags
    }

    pub fn payload(&self) -> &Table {
        &self.payload
    }

    pub fn identity(&self) -> Option<(&str, &str)> {
        self.identity
            .as_ref()
            .map(|(name, description)| (name.as_str(), description.as_str()))
    }

    /// Fingerprint of the significant subset of `payload`
    ///
    /// Used for both sides of a comparison so the persisted record is
    /// filtered with the same key selection as the desired one.
    pub fn significant_fingerprint(&self, payload: &Table) -> Fingerprint {
        match &self.significant {
            None => Fingerprint::of_table(payload),
            Some(keys) => {
                Fingerprint::of_entries(payload.iter().filter(|(key, _)| keys.contains(*key)))
            }
        }
    }

    /// The record persisted once the contribution succeeds
    pub fn to_metadata(&self) -> LayerMetadata {
        LayerMetadata::new(self.flags, self.payload.clone())
    }
}
