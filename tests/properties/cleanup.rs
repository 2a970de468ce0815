//! Property tests for touched-layer cleanup.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::common::TestLayers;

const PROTECTED: [&str; 3] = ["app.toml", "launch.toml", "store.toml"];

fn layer_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,11}")
        .unwrap()
        .prop_filter("not a protected stem", |s| {
            !matches!(s.as_str(), "app" | "launch" | "store")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after cleanup the surviving records are exactly
    /// (protected ∪ touched) ∩ existing.
    #[test]
    fn property_cleanup_keeps_protected_and_touched(
        existing in proptest::collection::btree_set(layer_name(), 0..8),
        touched in proptest::collection::btree_set(layer_name(), 0..8),
        protected_present in proptest::collection::vec(any::<bool>(), 3),
    ) {
        let env = TestLayers::new();
        for name in &existing {
            env.touch(&format!("{}.toml", name));
        }
        let mut expected: BTreeSet<String> = BTreeSet::new();
        for (file, present) in PROTECTED.iter().zip(&protected_present) {
            if *present {
                env.touch(file);
                expected.insert(file.to_string());
            }
        }

        let store = env.store();
        for name in &touched {
            store.register_layer(name).unwrap();
            if existing.contains(name) {
                expected.insert(format!("{}.toml", name));
            }
        }
        store.touched_layers().cleanup().unwrap();

        let survivors: BTreeSet<String> = env.entries().into_iter().collect();
        prop_assert_eq!(survivors, expected);
    }

    /// PROPERTY: registering never writes anything to disk.
    #[test]
    fn property_register_is_side_effect_free(names in proptest::collection::vec(layer_name(), 0..6)) {
        let env = TestLayers::new();
        let store = env.store();
        for name in &names {
            store.register_layer(name).unwrap();
        }
        prop_assert!(env.entries().is_empty());
    }
}
