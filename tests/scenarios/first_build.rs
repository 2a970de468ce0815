//! A build against an empty layers root.

use std::cell::Cell;

use buildlayers::{ContributionDecision, DesiredLayer, LayerFlags, LayerState};

use crate::common::TestLayers;

#[test]
fn cold_cache_contributes_every_layer_once() {
    let env = TestLayers::new();
    let store = env.store();
    let calls = Cell::new(0);

    for (name, version) in [("jdk", "11.0.2"), ("maven", "3.9.6")] {
        let desired = DesiredLayer::default()
            .with_entry("version", version)
            .with_flags(LayerFlags::CACHE);
        let mut layer = store.register_layer(name).unwrap();

        let decision = layer
            .contribute(&desired, |layer| {
                calls.set(calls.get() + 1);
                std::fs::write(layer.root().join("VERSION"), version)?;
                Ok(())
            })
            .unwrap();

        assert_eq!(decision, ContributionDecision::NeedsBuild);
        assert_eq!(layer.state(), LayerState::Built);
    }

    store.touched_layers().cleanup().unwrap();

    assert_eq!(calls.get(), 2);
    assert_eq!(env.entries(), vec!["jdk", "jdk.toml", "maven", "maven.toml"]);
    assert_eq!(env.read("maven/VERSION"), "3.9.6");
    assert_eq!(
        env.info.contents(),
        "-----> jdk: Contributing to layer\n-----> maven: Contributing to layer\n"
    );
}

#[test]
fn missing_root_is_created_on_first_contribution() {
    let env = TestLayers::new();
    let root = env.path("buildpack-id");
    let store = buildlayers::LayerStore::new(&root, env.logger());

    store.touched_layers().cleanup().unwrap();
    store
        .register_layer("jdk")
        .unwrap()
        .contribute(&DesiredLayer::default(), |_| Ok(()))
        .unwrap();

    assert!(root.join("jdk").is_dir());
    assert!(root.join("jdk.toml").is_file());
}
