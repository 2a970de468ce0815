//! buildlayers - cache layers for buildpacks
//!
//! A buildpack contributes named layers under a layers root. Each layer is a
//! directory plus a `<name>.toml` record; the record decides whether the next
//! build can reuse the directory or has to rebuild it. Layers a build no
//! longer produces are removed at the end of the run.
//!
//! ```no_run
//! use buildlayers::{DesiredLayer, LayerFlags, LayerStore, LogConfig, EnvSnapshot};
//!
//! # fn main() -> Result<(), buildlayers::LayersError> {
//! let env = EnvSnapshot::capture();
//! let store = LayerStore::new("/layers/my-buildpack", LogConfig::from_env(&env).logger());
//!
//! let desired = DesiredLayer::default()
//!     .with_entry("version", "11.0.2")
//!     .with_flags(LayerFlags::BUILD | LayerFlags::CACHE);
//! store.register_layer("jdk")?.contribute(&desired, |layer| {
//!     std::fs::write(layer.root().join("release"), "11.0.2")?;
//!     Ok(())
//! })?;
//!
//! store.touched_layers().cleanup()?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logger;

// Re-exports for convenience
pub use application::layers::{EnvOp, EnvScope, Layer, LayerStore, TouchedLayers};
pub use config::{EnvSnapshot, FunctionMetadata, LogConfig};
pub use domain::entities::{
    ApplicationMetadata, Credentials, DesiredLayer, LayerMetadata, LayerState, Process, Service,
    Services, Slice,
};
pub use domain::value_objects::{ContributionDecision, LayerFlags, LayerName};
pub use error::{CleanupFailure, CleanupFailures, LayersError, LayersResult};
pub use infrastructure::extract_zip;
pub use logger::{Identifiable, LogLevels, Logger};
