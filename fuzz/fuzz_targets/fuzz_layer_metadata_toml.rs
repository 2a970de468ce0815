#![no_main]

use libfuzzer_sys::fuzz_target;
use serde::Deserialize;

/// Mirror of TomlLayerRecord for fuzzing (private in main crate)
#[derive(Deserialize)]
struct TomlLayerRecord {
    #[serde(default)]
    #[allow(dead_code)]
    build: bool,
    #[serde(default)]
    #[allow(dead_code)]
    cache: bool,
    #[serde(default)]
    #[allow(dead_code)]
    launch: bool,
    #[serde(default)]
    metadata: toml::Table,
}

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz layer record parsing and fingerprinting - this should never panic
        if let Ok(record) = toml::from_str::<TomlLayerRecord>(content) {
            let desired = buildlayers::DesiredLayer::new(record.metadata);
            let _ = desired.significant_fingerprint(desired.payload());
        }
    }
});
