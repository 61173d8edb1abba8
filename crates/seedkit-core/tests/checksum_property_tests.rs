use proptest::prelude::*;
use serde_json::{Map, Value};
use seedkit_core::checksum;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::String),
    ]
}

fn fields() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map("[a-z]{1,8}", leaf(), 0..8)
        .prop_map(|map| map.into_iter().collect())
}

fn build(entries: &[(String, Value)]) -> Map<String, Value> {
    entries.iter().cloned().collect()
}

proptest! {
    #[test]
    fn checksum_ignores_key_order(entries in fields()) {
        let forward = build(&entries);
        let mut reversed_entries = entries.clone();
        reversed_entries.reverse();
        let reversed = build(&reversed_entries);

        prop_assert_eq!(checksum(&forward), checksum(&reversed));
    }

    #[test]
    fn checksum_ignores_nested_key_order(entries in fields()) {
        let mut outer_a = Map::new();
        outer_a.insert("nested".to_string(), Value::Object(build(&entries)));
        let mut reversed_entries = entries.clone();
        reversed_entries.reverse();
        let mut outer_b = Map::new();
        outer_b.insert("nested".to_string(), Value::Object(build(&reversed_entries)));

        prop_assert_eq!(checksum(&outer_a), checksum(&outer_b));
    }

    #[test]
    fn checksum_is_lowercase_sha256_hex(entries in fields()) {
        let digest = checksum(&build(&entries));
        prop_assert_eq!(digest.len(), 64);
        prop_assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn checksum_changes_with_values(entries in fields(), extra in "[a-z]{1,8}") {
        let base = build(&entries);
        let mut changed = base.clone();
        changed.insert(format!("{}_x", extra), Value::Bool(true));

        prop_assert_ne!(checksum(&base), checksum(&changed));
    }
}
