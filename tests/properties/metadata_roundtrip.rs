//! Property tests for layer record persistence.

use proptest::prelude::*;
use toml::{Table, Value};

use buildlayers::{ContributionDecision, DesiredLayer, LayerFlags};

use crate::common::TestLayers;

fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,8}").unwrap()
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[ -~]{0,16}".prop_map(Value::String),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e9..1.0e9f64).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
    ]
}

fn payload() -> impl Strategy<Value = Table> {
    let nested = proptest::collection::btree_map(key(), leaf(), 0..4)
        .prop_map(|entries| Value::Table(entries.into_iter().collect()));
    proptest::collection::btree_map(key(), prop_oneof![3 => leaf(), 1 => nested], 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn flags() -> impl Strategy<Value = LayerFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(build, cache, launch)| LayerFlags {
        build,
        cache,
        launch,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a contributed layer is reused by the next build with the
    /// same desired state, whatever the payload holds.
    #[test]
    fn property_contributed_payload_is_reused(payload in payload(), flags in flags()) {
        let env = TestLayers::new();
        let desired = DesiredLayer::new(payload).with_flags(flags);

        let first = env.store().register_layer("layer").unwrap()
            .contribute(&desired, |_| Ok(()))
            .unwrap();
        prop_assert_eq!(first, ContributionDecision::NeedsBuild);

        let mut calls = 0;
        let second = env.store().register_layer("layer").unwrap()
            .contribute(&desired, |_| { calls += 1; Ok(()) })
            .unwrap();
        prop_assert_eq!(second, ContributionDecision::NoActionNeeded);
        prop_assert_eq!(calls, 0);
    }

    /// PROPERTY: the record on disk decodes to the desired payload and flags.
    #[test]
    fn property_record_round_trips(payload in payload(), flags in flags()) {
        let env = TestLayers::new();
        let desired = DesiredLayer::new(payload.clone()).with_flags(flags);
        env.store().register_layer("layer").unwrap()
            .contribute(&desired, |_| Ok(()))
            .unwrap();

        let record: Table = toml::from_str(&env.read("layer.toml")).unwrap();
        prop_assert_eq!(record.get("build"), Some(&Value::Boolean(flags.build)));
        prop_assert_eq!(record.get("cache"), Some(&Value::Boolean(flags.cache)));
        prop_assert_eq!(record.get("launch"), Some(&Value::Boolean(flags.launch)));
        let metadata = record.get("metadata").and_then(Value::as_table).cloned().unwrap_or_default();
        prop_assert_eq!(metadata, payload);
    }
}
