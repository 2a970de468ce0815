//! Contribution planning service
//!
//! Pure domain logic deciding whether a layer must be rebuilt, only have its
//! record refreshed, or be reused as is. No I/O happens here; the caller
//! reads the persisted record and hands it over.

use crate::domain::entities::{DesiredLayer, LayerMetadata};
use crate::domain::value_objects::ContributionDecision;

/// What was found at a layer's metadata path
#[derive(Debug, Clone, PartialEq)]
pub enum PersistedRecord {
    /// No record on disk
    Missing,
    /// A record exists but could not be read or decoded
    Corrupt(String),
    /// A readable record
    Present(LayerMetadata),
}

impl PersistedRecord {
    /// Whether something on disk represented a previous contribution
    pub fn existed(&self) -> bool {
        !matches!(self, PersistedRecord::Missing)
    }
}

/// Planner for layer contributions
pub struct ContributionPlanner;

impl ContributionPlanner {
    /// Compare the desired state of a layer with its persisted record
    ///
    /// A missing or corrupt record always requires a build.
    pub fn plan(persisted: &PersistedRecord, desired: &DesiredLayer) -> ContributionDecision {
        match persisted {
            PersistedRecord::Missing | PersistedRecord::Corrupt(_) => {
                ContributionDecision::NeedsBuild
            }
            PersistedRecord::Present(previous) => {
                let payload_changed = desired.significant_fingerprint(&previous.payload)
                    != desired.significant_fingerprint(desired.payload());
                let flags_changed = previous.flags != desired.flags();
                ContributionDecision::from_mismatch(payload_changed, flags_changed)
            }
        }
    }
}
