//! Service bindings from the `VCAP_SERVICES` document
//!
//! The document maps a service label to the list of instances bound under
//! that label.

use std::collections::BTreeMap;

use crate::config::EnvSnapshot;
use crate::domain::entities::{Service, Services};
use crate::error::LayersResult;

/// Environment variable carrying the bindings document
pub const VCAP_SERVICES_VAR: &str = "VCAP_SERVICES";

impl Services {
    /// Parse a `VCAP_SERVICES` JSON document
    ///
    /// Instances without an explicit label inherit the key they are listed
    /// under. Blank input yields no services.
    pub fn from_vcap_services(json: &str) -> LayersResult<Self> {
        if json.trim().is_empty() {
            return Ok(Services::default());
        }

        let document: BTreeMap<String, Vec<Service>> = serde_json::from_str(json)?;
        Ok(document
            .into_iter()
            .flat_map(|(label, services)| {
                services.into_iter().map(move |mut service| {
                    if service.label.is_empty() {
                        service.label = label.clone();
                    }
                    service
                })
            })
            .collect())
    }

    /// Services bound through the environment snapshot
    pub fn from_env(env: &EnvSnapshot) -> LayersResult<Self> {
        match env.get(VCAP_SERVICES_VAR) {
            Some(json) => Self::from_vcap_services(json),
            None => Ok(Services::default()),
        }
    }
}
