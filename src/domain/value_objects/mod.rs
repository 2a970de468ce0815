//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod decision;
mod fingerprint;
mod layer_flags;
mod layer_name;

pub use config_warning::ConfigWarning;
pub use decision::ContributionDecision;
pub use fingerprint::Fingerprint;
pub use layer_flags::LayerFlags;
pub use layer_name::{LayerName, METADATA_EXTENSION};

/// Application metadata written by [`LayerStore::write_application_metadata`]
///
/// [`LayerStore::write_application_metadata`]: crate::application::layers::LayerStore::write_application_metadata
pub const APPLICATION_METADATA_FILE: &str = "app.toml";

/// Launch descriptor written by the platform
pub const LAUNCH_METADATA_FILE: &str = "launch.toml";

/// Persistent store descriptor carried from build to build
pub const STORE_METADATA_FILE: &str = "store.toml";

/// Files under the layers root that cleanup never removes
pub const PROTECTED_FILENAMES: [&str; 3] = [
    APPLICATION_METADATA_FILE,
    LAUNCH_METADATA_FILE,
    STORE_METADATA_FILE,
];
