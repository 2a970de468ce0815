//! Domain Entities
//!
//! - `LayerMetadata` / `DesiredLayer` - persisted and desired layer records
//! - `ApplicationMetadata` - process types and slices of the application
//! - `Services` - service bindings available to the build

mod application_metadata;
mod binding;
mod layer;

pub use application_metadata::{ApplicationMetadata, Process, Slice};
pub use binding::{Credentials, Service, Services};
pub use layer::{DesiredLayer, LayerMetadata, LayerState};
