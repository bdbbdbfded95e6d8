//! Property-based tests for configuration merging.

use super::layered::LayeredConfig;
use super::merger::ConfigMerger;
use super::value::{ConfigMap, ConfigValue};
use proptest::prelude::*;
use serde_json::json;

// Strategy for scalar leaves
fn scalar_strategy() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(ConfigValue::String),
    ]
}

// Strategy for arbitrary nested values
fn value_strategy() -> impl Strategy<Value = ConfigValue> {
    scalar_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::Array),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                .prop_map(|m| ConfigValue::Object(m.into_iter().collect())),
        ]
    })
}

// Strategy for object roots
fn map_strategy() -> impl Strategy<Value = ConfigMap> {
    prop::collection::btree_map("[a-e]{1,2}", value_strategy(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

// Strategy for containers whose top level is a given kind
fn array_strategy() -> impl Strategy<Value = ConfigValue> {
    prop::collection::vec(value_strategy(), 0..4).prop_map(ConfigValue::Array)
}

fn object_strategy() -> impl Strategy<Value = ConfigValue> {
    map_strategy().prop_map(ConfigValue::Object)
}

// Pairs whose kinds never both are objects or both arrays
fn mismatched_pair_strategy() -> impl Strategy<Value = (ConfigValue, ConfigValue)> {
    prop_oneof![
        (scalar_strategy(), scalar_strategy()),
        (scalar_strategy(), array_strategy()),
        (scalar_strategy(), object_strategy()),
        (array_strategy(), scalar_strategy()),
        (object_strategy(), scalar_strategy()),
        (array_strategy(), object_strategy()),
        (object_strategy(), array_strategy()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Keys unique to either side survive unchanged; shared keys are merged
    #[test]
    fn object_merge_preserves_and_merges_keys(base in map_strategy(), overlay in map_strategy()) {
        let merged = ConfigMerger::merge_maps(&base, &overlay);

        for (key, value) in &base {
            if !overlay.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for (key, value) in &overlay {
            match base.get(key) {
                None => prop_assert_eq!(merged.get(key), Some(value)),
                Some(base_value) => {
                    let expected = ConfigMerger::merge(base_value, value);
                    prop_assert_eq!(merged.get(key), Some(&expected));
                }
            }
        }
        prop_assert_eq!(merged.len(), base.keys().chain(overlay.keys()).collect::<std::collections::BTreeSet<_>>().len());
    }

    // Arrays concatenate in order without deduplication
    #[test]
    fn array_merge_concatenates(
        a in prop::collection::vec(value_strategy(), 0..5),
        b in prop::collection::vec(value_strategy(), 0..5)
    ) {
        let merged = ConfigMerger::merge(&ConfigValue::Array(a.clone()), &ConfigValue::Array(b.clone()));
        let mut expected = a;
        expected.extend(b);
        prop_assert_eq!(merged, ConfigValue::Array(expected));
    }

    // Mismatched kinds and scalars: the overlay wins verbatim
    #[test]
    fn mismatched_merge_takes_overlay((base, overlay) in mismatched_pair_strategy()) {
        prop_assert_eq!(ConfigMerger::merge(&base, &overlay), overlay);
    }

    // An empty object is a right identity for merge
    #[test]
    fn empty_overlay_is_identity(base in map_strategy()) {
        let merged = ConfigMerger::merge_maps(&base, &ConfigMap::new());
        prop_assert_eq!(merged, base);
    }

    // Push followed by pop restores the effective configuration
    #[test]
    fn push_pop_round_trip(base in map_strategy(), layers in prop::collection::vec(map_strategy(), 1..4)) {
        let mut config = LayeredConfig::new(base);
        let before = config.effective();

        let mut pushed = 0;
        for layer in layers {
            if config.push_value(layer, "prop", "prop.json").is_some() {
                pushed += 1;
            }
        }
        for _ in 0..pushed {
            config.pop_layer().unwrap();
        }

        prop_assert_eq!(config.effective(), before);
    }

    // effective() is the left fold of merge over the stack
    #[test]
    fn effective_is_ordered_fold(base in map_strategy(), layers in prop::collection::vec(map_strategy(), 0..4)) {
        let mut config = LayeredConfig::new(base.clone());
        let mut expected = ConfigValue::Object(base);
        for layer in layers {
            if !layer.is_empty() {
                expected = ConfigMerger::merge(&expected, &ConfigValue::Object(layer.clone()));
            }
            config.push_value(layer, "prop", "prop.json");
        }
        prop_assert_eq!(config.effective(), expected);
    }
}
