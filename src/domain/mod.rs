//! Domain Layer
//!
//! Pure layer-caching rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Layer records, application metadata, service bindings
//! - `value_objects/` - Immutable value types (LayerName, LayerFlags, Fingerprint)
//! - `services/` - Domain services (ContributionPlanner, process table)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
