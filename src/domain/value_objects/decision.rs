//! Contribution decision value object

use std::fmt;

/// Outcome of comparing a desired layer state with the persisted record
///
/// The "build" side covers the significant payload: when it differs the
/// layer contents are stale and the contribution action must run. The
/// "cache" side covers the layer flags: when only they differ the contents
/// are reused and just the record is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionDecision {
    NoActionNeeded,
    NeedsBuild,
    NeedsCache,
    NeedsBoth,
}

impl ContributionDecision {
    pub fn from_mismatch(payload_changed: bool, flags_changed: bool) -> Self {
        match (payload_changed, flags_changed) {
            (false, false) => Self::NoActionNeeded,
            (true, false) => Self::NeedsBuild,
            (false, true) => Self::NeedsCache,
            (true, true) => Self::NeedsBoth,
        }
    }

    /// Whether the contribution action has to run
    pub fn requires_action(self) -> bool {
        matches!(self, Self::NeedsBuild | Self::NeedsBoth)
    }

    /// Whether the metadata record has to be rewritten
    pub fn requires_write(self) -> bool {
        self != Self::NoActionNeeded
    }
}

impl fmt::Display for ContributionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoActionNeeded => "no action needed",
            Self::NeedsBuild => "needs build",
            Self::NeedsCache => "needs cache",
            Self::NeedsBoth => "needs build and cache",
        };
        f.write_str(s)
    }
}
