//! Application Layer
//!
//! Orchestrates domain rules over the file system.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! - `layers` - `LayerStore`, `Layer` handles and `TouchedLayers` cleanup

pub mod layers;

pub use layers::{EnvOp, EnvScope, Layer, LayerStore, TouchedLayers};
