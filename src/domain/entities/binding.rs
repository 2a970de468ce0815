//! Service binding entities
//!
//! A build may be bound to external services (databases, APM agents,
//! credential brokers). Buildpacks look a binding up by a name filter and
//! optionally require the binding to carry specific credential keys.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Credential payload of a bound service
pub type Credentials = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub binding_name: String,
    #[serde(default, rename = "name")]
    pub instance_name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub credentials: Credentials,
}

impl Service {
    fn matches(&self, filter: &Regex) -> bool {
        filter.is_match(&self.binding_name)
            || filter.is_match(&self.instance_name)
            || filter.is_match(&self.label)
            || self.tags.iter().any(|tag| filter.is_match(tag))
    }

    fn has_credentials(&self, keys: &[&str]) -> bool {
        keys.iter().all(|key| self.credentials.contains_key(*key))
    }
}

/// Every service bound to the build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Services(Vec<Service>);

impl Services {
    pub fn new(services: Vec<Service>) -> Self {
        Self(services)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Credentials of the single service matching `filter` and carrying
    /// every key in `credential_keys`
    ///
    /// `filter` is a regular expression tested against the binding name,
    /// instance name, label and tags; a filter that is not a valid
    /// expression is matched literally. Zero or several matches yield `None`.
    pub fn find_service_credentials(
        &self,
        filter: &str,
        credential_keys: &[&str],
    ) -> Option<&Credentials> {
        let mut matches = self.matching(filter, credential_keys).into_iter();
        match (matches.next(), matches.next()) {
            (Some(service), None) => Some(&service.credentials),
            _ => None,
        }
    }

    /// Whether exactly one service matches `filter` and carries every key
    pub fn has_service(&self, filter: &str, credential_keys: &[&str]) -> bool {
        self.matching(filter, credential_keys).len() == 1
    }

    fn matching(&self, filter: &str, credential_keys: &[&str]) -> Vec<&Service> {
        let Some(filter) = compile_filter(filter) else {
            return Vec::new();
        };

        self.0
            .iter()
            .filter(|service| service.matches(&filter) && service.has_credentials(credential_keys))
            .collect()
    }
}

fn compile_filter(filter: &str) -> Option<Regex> {
    Regex::new(filter)
        .or_else(|e| {
            tracing::debug!(filter, error = %e, "service filter is not a regex, matching literally");
            Regex::new(&regex::escape(filter))
        })
        .ok()
}

impl FromIterator<Service> for Services {
    fn from_iter<T: IntoIterator<Item = Service>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
