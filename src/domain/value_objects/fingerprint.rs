//! Metadata Fingerprint Value Object
//!
//! A SHA-256 digest of a layer's significant metadata. Two payloads have the
//! same fingerprint exactly when their significant values are equal, so the
//! contribution planner compares fingerprints instead of walking trees.

use std::fmt;

use sha2::{Digest, Sha256};
use toml::{Table, Value};

/// Fingerprint value object
///
/// Wraps a SHA-256 hex digest with the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Prefix for SHA-256 fingerprints
    pub const PREFIX: &'static str = "sha256:";

    /// Fingerprint every entry of `table`
    pub fn of_table(table: &Table) -> Self {
        Self::of_entries(table.iter())
    }

    /// Fingerprint a selection of entries
    ///
    /// Entries must come in key order; `Table` iteration already is.
    pub fn of_entries<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> Self {
        let mut hasher = Sha256::new();
        feed_entries(&mut hasher, entries);
        Self(format!("{}{:x}", Self::PREFIX, hasher.finalize()))
    }

    /// Get the full fingerprint with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

fn feed_entries<'a>(hasher: &mut Sha256, entries: impl Iterator<Item = (&'a String, &'a Value)>) {
    hasher.update(b"{");
    for (key, value) in entries {
        feed_str(hasher, key);
        feed_value(hasher, value);
    }
    hasher.update(b"}");
}

// Every value is tagged and length-prefixed so distinct trees never share a
// byte stream.
fn feed_value(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::String(s) => {
            hasher.update(b"s");
            feed_str(hasher, s);
        }
        Value::Integer(i) => {
            hasher.update(b"i");
            hasher.update(i.to_be_bytes());
        }
        Value::Float(x) => {
            hasher.update(b"f");
            hasher.update(x.to_bits().to_be_bytes());
        }
        Value::Boolean(b) => {
            hasher.update(if *b { b"t" } else { b"F" });
        }
        Value::Datetime(dt) => {
            hasher.update(b"d");
            feed_str(hasher, &dt.to_string());
        }
        Value::Array(items) => {
            hasher.update(b"[");
            hasher.update((items.len() as u64).to_be_bytes());
            for item in items {
                feed_value(hasher, item);
            }
            hasher.update(b"]");
        }
        Value::Table(table) => feed_entries(hasher, table.iter()),
    }
}

fn feed_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_be_bytes());
    hasher.update(s.as_bytes());
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
