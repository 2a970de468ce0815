//! Application-wide metadata, function metadata and bindings.

use buildlayers::config::ARTIFACT_ENV;
use buildlayers::{ApplicationMetadata, EnvSnapshot, FunctionMetadata, Services, Slice};

use crate::common::{TestLayers, RIFF_TOML, VCAP_SERVICES};

#[test]
fn process_table_output() {
    let env = TestLayers::new();
    let metadata = ApplicationMetadata::default()
        .with_process("web", "java -jar app.jar")
        .with_process("worker", "java -cp app.jar Worker")
        .with_process("a-very-long-type", "./bin/long")
        .with_slice(Slice {
            paths: vec!["BOOT-INF/lib/**".to_string()],
        });

    env.store().write_application_metadata(&metadata).unwrap();

    insta::assert_snapshot!(env.info.contents().trim_end(), @r"
    -----> Process types:
          a-very-long-type: ./bin/long
          web:              java -jar app.jar
          worker:           java -cp app.jar Worker
    -----> 1 application slices
    ");

    let written: ApplicationMetadata = toml::from_str(&env.read("app.toml")).unwrap();
    assert_eq!(written, metadata);
}

#[test]
fn app_metadata_survives_cleanup() {
    let env = TestLayers::new();
    let store = env.store();

    store
        .write_application_metadata(&ApplicationMetadata::default().with_process("web", "run"))
        .unwrap();
    store.touched_layers().cleanup().unwrap();

    assert!(env.path("app.toml").is_file());
}

#[test]
fn function_metadata_environment_wins() {
    let env = TestLayers::new();
    env.write("app/riff.toml", RIFF_TOML);

    let snapshot = EnvSnapshot::from_iter([(ARTIFACT_ENV, "env-artifact")]);
    let metadata = FunctionMetadata::resolve(&env.path("app"), &snapshot, &env.logger()).unwrap();

    assert_eq!(metadata.artifact, "env-artifact");
    assert_eq!(metadata.handler, "toml-handler");
    assert!(env
        .debug
        .contents()
        .contains("riff metadata: artifact: env-artifact, handler: toml-handler"));
}

#[test]
fn service_credentials_from_environment() {
    let snapshot = EnvSnapshot::from_iter([("VCAP_SERVICES", VCAP_SERVICES)]);
    let services = Services::from_env(&snapshot).unwrap();

    let credentials = services
        .find_service_credentials("postgres", &["uri", "username"])
        .unwrap();
    assert_eq!(credentials["uri"], serde_json::json!("postgres://orders"));

    assert!(services.has_service("newrelic", &["licenseKey"]));
    assert!(!services.has_service("newrelic", &["missing"]));
    assert!(!services.has_service(".*", &[]));
}
