//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, in-memory for tests)
//! - `repositories/` - Repository implementations (TOML metadata, service bindings)
//! - `archive` - Zip extraction into layer directories

pub mod archive;
pub mod fs;
pub mod repositories;

// Re-export for convenience
pub use archive::extract_zip;
pub use fs::LocalFs;
pub use repositories::TomlMetadataRepository;
