//! Builds against a root left behind by a previous build.

use buildlayers::{ContributionDecision, DesiredLayer, LayerFlags, LayersError};

use crate::common::{TestLayers, JDK_RECORD};

fn jdk(version: &str) -> DesiredLayer {
    DesiredLayer::default()
        .with_entry("version", version)
        .with_flags(LayerFlags::BUILD | LayerFlags::CACHE)
}

#[test]
fn warm_cache_reuses_layer() {
    let env = TestLayers::new();
    env.write("jdk.toml", JDK_RECORD);
    let marker = env.touch("jdk/bin/java");

    let mut layer = env.store().register_layer("jdk").unwrap();
    let decision = layer
        .contribute(&jdk("11.0.2"), |_| panic!("cached layer rebuilt"))
        .unwrap();

    assert_eq!(decision, ContributionDecision::NoActionNeeded);
    assert!(marker.is_file());
    assert_eq!(env.read("jdk.toml"), JDK_RECORD);
    assert_eq!(env.info.contents(), "-----> jdk: Reusing cached layer\n");
}

#[test]
fn informational_keys_do_not_invalidate() {
    let env = TestLayers::new();
    env.write("jdk.toml", JDK_RECORD);

    let desired = jdk("11.0.2")
        .with_entry("uri", "https://mirror.example.com/jdk.tgz")
        .significant(["version"]);
    let decision = env
        .store()
        .register_layer("jdk")
        .unwrap()
        .contribute(&desired, |_| panic!("cached layer rebuilt"))
        .unwrap();

    assert_eq!(decision, ContributionDecision::NoActionNeeded);
}

#[test]
fn changed_payload_and_flags_rebuild() {
    let env = TestLayers::new();
    env.write("jdk.toml", JDK_RECORD);
    env.touch("jdk/stale");

    let desired = jdk("17.0.1").with_flags(LayerFlags::LAUNCH);
    let decision = env
        .store()
        .register_layer("jdk")
        .unwrap()
        .contribute(&desired, |layer| {
            assert!(!layer.root().join("stale").exists());
            Ok(())
        })
        .unwrap();

    assert_eq!(decision, ContributionDecision::NeedsBoth);
    let record = env.read("jdk.toml");
    assert!(record.contains("launch = true"));
    assert!(record.contains("version = \"17.0.1\""));
}

#[test]
fn corrupt_record_is_logged_at_debug_and_rebuilt() {
    let env = TestLayers::new();
    env.write("jdk.toml", "not = [valid");

    let decision = env
        .store()
        .register_layer("jdk")
        .unwrap()
        .contribute(&jdk("11.0.2"), |_| Ok(()))
        .unwrap();

    assert_eq!(decision, ContributionDecision::NeedsBuild);
    assert!(env
        .debug
        .contents()
        .starts_with("-----> DEBUG: Ignoring unreadable layer metadata"));
    let record = env.read("jdk.toml");
    assert!(record.contains("build = true"));
    assert!(record.contains("version = \"11.0.2\""));
}

#[test]
fn untouched_layers_are_removed_and_protected_files_kept() {
    let env = TestLayers::new();
    env.touch("test-layer-1.toml");
    env.touch("test-layer-2.toml");
    env.touch("test-layer-2/lib/file.jar");
    for name in ["app.toml", "launch.toml", "store.toml"] {
        env.touch(name);
    }

    let store = env.store();
    store
        .register_layer("test-layer-1")
        .unwrap()
        .contribute(&DesiredLayer::default(), |_| Ok(()))
        .unwrap();
    store.touched_layers().cleanup().unwrap();

    assert_eq!(
        env.entries(),
        vec![
            "app.toml",
            "launch.toml",
            "store.toml",
            "test-layer-1.toml"
        ]
    );
}

#[test]
fn failed_contribution_is_reported_and_not_recorded() {
    let env = TestLayers::new();
    let store = env.store();
    let mut layer = store.register_layer("jdk").unwrap();

    let err = layer
        .contribute(&jdk("11.0.2"), |_| anyhow::bail!("checksum mismatch"))
        .unwrap_err();

    assert!(matches!(err, LayersError::Contribution { .. }));
    assert_eq!(err.contribution_source().unwrap().to_string(), "checksum mismatch");
    assert!(!env.path("jdk.toml").exists());

    // the failed layer was still registered, so cleanup keeps its directory
    store.touched_layers().cleanup().unwrap();
    assert!(env.path("jdk").is_dir());
}
