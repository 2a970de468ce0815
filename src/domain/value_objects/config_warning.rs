//! Configuration warning value object.

use std::path::PathBuf;

/// Non-fatal configuration warning.
///
/// Raised while decoding an application metadata file that carries keys the
/// record type does not know about. Unknown keys never fail a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
}
