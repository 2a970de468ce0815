//! Environment snapshot

use std::collections::BTreeMap;

use crate::infrastructure::repositories::VCAP_SERVICES_VAR;

pub const ARTIFACT_ENV: &str = "RIFF_ARTIFACT";
pub const HANDLER_ENV: &str = "RIFF_HANDLER";
pub const OVERRIDE_ENV: &str = "RIFF_OVERRIDE";
pub const DEBUG_ENV: &str = "BP_DEBUG";

const RECOGNIZED: [&str; 5] = [
    ARTIFACT_ENV,
    HANDLER_ENV,
    OVERRIDE_ENV,
    DEBUG_ENV,
    VCAP_SERVICES_VAR,
];

/// Immutable view of the environment variables this crate reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the recognized variables from the current process
    ///
    /// Variables that are unset or not valid unicode are left out.
    pub fn capture() -> Self {
        RECOGNIZED
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|value| (*name, value)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// The value of `name` when set to something other than the empty string
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
