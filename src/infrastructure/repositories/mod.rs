//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod bindings;
mod metadata;

pub use bindings::VCAP_SERVICES_VAR;
pub use metadata::TomlMetadataRepository;
