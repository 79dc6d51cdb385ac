//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check get/set behavior over arbitrary keys, values and
//! operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;

use serde_json::{json, Value};
use tokio_test::block_on;

use crate::cache::ExpiringCache;
use crate::memento::{InMemoryMemento, Memento};

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:.-]{1,64}".prop_map(|s| s)
}

/// Generates JSON values of a few shapes
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,64}".prop_map(Value::from),
        prop::collection::vec(any::<u16>(), 0..8).prop_map(|v| json!(v)),
    ]
}

/// Generates a lifetime: none, zero, or a long positive duration
fn expiration_strategy() -> impl Strategy<Value = Option<u64>> {
    prop_oneof![Just(None), Just(Some(0)), (60u64..1_000_000).prop_map(Some)]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any key never written, get returns None.
    #[test]
    fn prop_unwritten_key_is_absent(key in key_strategy()) {
        let cache = ExpiringCache::with_default_namespace(InMemoryMemento::new()).unwrap();
        prop_assert_eq!(cache.get::<Value>(&key).unwrap(), None);
    }

    // For any value and any non-expiring or still-live lifetime, the value
    // reads back immediately after set resolves.
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        value in value_strategy(),
        expiration in expiration_strategy()
    ) {
        let mut cache = ExpiringCache::with_default_namespace(InMemoryMemento::new()).unwrap();

        block_on(cache.set(key.clone(), value.clone(), expiration)).unwrap();

        prop_assert_eq!(cache.get::<Value>(&key).unwrap(), Some(value));
    }

    // Setting V1 then V2 under the same key leaves V2 and a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = ExpiringCache::with_default_namespace(InMemoryMemento::new()).unwrap();

        block_on(cache.set(key.clone(), value1, None)).unwrap();
        block_on(cache.set(key.clone(), value2.clone(), None)).unwrap();

        prop_assert_eq!(cache.get::<Value>(&key).unwrap(), Some(value2));
        prop_assert_eq!(cache.len(), 1, "Should have exactly one entry after overwrite");
    }

    // After any sequence of operations, the cache agrees with a plain map
    // model, and a fresh instance over the same store agrees too.
    #[test]
    fn prop_matches_model_and_survives_reload(
        ops in prop::collection::vec(cache_op_strategy(), 1..50),
        namespace in "[a-z]{1,12}"
    ) {
        let store = InMemoryMemento::new();
        let mut cache = ExpiringCache::new(store.clone(), Some(namespace.as_str())).unwrap();
        let mut model: HashMap<String, Value> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    block_on(cache.set(key.clone(), value.clone(), None)).unwrap();
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get::<Value>(&key).unwrap(), model.get(&key).cloned());
                }
            }
        }

        prop_assert_eq!(cache.len(), model.len());

        let reloaded = ExpiringCache::new(store.clone(), Some(namespace.as_str())).unwrap();
        for (key, value) in &model {
            let got = reloaded.get::<Value>(key).unwrap();
            prop_assert_eq!(got.as_ref(), Some(value));
        }

        if !model.is_empty() {
            prop_assert_eq!(store.list_keys(), vec![namespace.clone()]);
        }
    }

    // Any entry whose expiration lies in the past reads as absent while
    // still occupying the mapping.
    #[test]
    fn prop_past_expiration_is_absent(
        key in key_strategy(),
        value in value_strategy(),
        expiration in 0i64..1_000_000_000
    ) {
        let mut mapping = serde_json::Map::new();
        mapping.insert(key.clone(), json!({ "value": value, "expiration": expiration }));
        let store = InMemoryMemento::with_entries([("cache", Value::Object(mapping))]);

        let cache = ExpiringCache::with_default_namespace(store).unwrap();

        prop_assert_eq!(cache.get::<Value>(&key).unwrap(), None);
        prop_assert_eq!(cache.len(), 1);
    }
}
