#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz bindings parsing and filter matching - this should never panic
        if let Ok(services) = buildlayers::Services::from_vcap_services(content) {
            let _ = services.find_service_credentials(content, &["uri"]);
        }
    }
});
