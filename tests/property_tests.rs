//! Property-based tests for the lifecycle engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use cloudconnect::core::{Lifecycle, State};
use cloudconnect::{
    Error, LifecycleEvent, MemorySink, RawConfig, Registry, ResourceFactory, ResourceState,
};
use proptest::prelude::*;

fn registry() -> Registry<MemorySink> {
    Registry::with_sink(ResourceFactory::default(), MemorySink::new())
}

fn app_raw(runtime: &str, region: &str, replicas: i64) -> RawConfig {
    RawConfig::new()
        .with("runtime", runtime)
        .with("region", region)
        .with("replicas", replicas.to_string())
}

fn storage_raw(encryption: &str, key: &str, size: i64) -> RawConfig {
    RawConfig::new()
        .with("encryption", encryption)
        .with("accessKey", key)
        .with("sizeGb", size.to_string())
}

fn cache_raw(ttl: i64, capacity: i64, eviction: &str) -> RawConfig {
    RawConfig::new()
        .with("ttlSeconds", ttl.to_string())
        .with("capacityMb", capacity.to_string())
        .with("eviction", eviction)
}

prop_compose! {
    fn arbitrary_event()(variant in 0..3u8) -> LifecycleEvent {
        match variant {
            0 => LifecycleEvent::Start,
            1 => LifecycleEvent::Stop,
            _ => LifecycleEvent::Delete,
        }
    }
}

prop_compose! {
    fn valid_app()(
        runtime in prop::sample::select(vec!["python", "nodejs", "dotnet"]),
        region in prop::sample::select(vec!["EastUS", "WestEurope", "CentralIndia"]),
        replicas in 1..=3i64,
    ) -> RawConfig {
        app_raw(runtime, region, replicas)
    }
}

prop_compose! {
    fn valid_storage()(
        encryption in prop::sample::select(vec!["true", "false", "yes", "no", "Y", "N"]),
        key in "[a-zA-Z0-9]{8,32}",
        size in 1..=10_000i64,
    ) -> RawConfig {
        storage_raw(encryption, &key, size)
    }
}

prop_compose! {
    fn valid_cache()(
        ttl in 60..=86_400i64,
        capacity in 128..=16_384i64,
        eviction in prop::sample::select(vec!["LRU", "FIFO", "LFU", "lru", "fifo", "lfu"]),
    ) -> RawConfig {
        cache_raw(ttl, capacity, eviction)
    }
}

/// A config for some type with exactly one bad field, and that field's name.
fn single_violation() -> impl Strategy<Value = (&'static str, RawConfig, &'static str)> {
    prop_oneof![
        "[a-z]{1,8}"
            .prop_filter("allowed runtime", |runtime| {
                !["python", "nodejs", "dotnet"].contains(&runtime.as_str())
            })
            .prop_map(|runtime| ("AppService", app_raw(&runtime, "EastUS", 1), "runtime")),
        "[a-z]{1,12}".prop_map(|region| ("AppService", app_raw("python", &region, 2), "region")),
        "[a-z]{4,8}"
            .prop_filter("boolean word", |word| !["true", "false"].contains(&word.as_str()))
            .prop_map(|word| ("StorageAccount", storage_raw(&word, "abcdefgh", 10), "encryption")),
        prop_oneof![-100..=0i64, 10_001..=50_000i64]
            .prop_map(|size| ("StorageAccount", storage_raw("no", "abcdefgh", size), "sizeGb")),
        prop_oneof![0..128i64, 16_385..=50_000i64]
            .prop_map(|capacity| ("CacheDB", cache_raw(300, capacity, "LRU"), "capacityMb")),
        "[a-z]{4,8}"
            .prop_filter("eviction policy", |policy| policy != "fifo")
            .prop_map(|policy| ("CacheDB", cache_raw(300, 256, &policy), "eviction")),
    ]
}

fn apply(
    registry: &mut Registry<MemorySink>,
    name: &str,
    event: LifecycleEvent,
) -> Result<ResourceState, Error> {
    match event {
        LifecycleEvent::Start => registry.start_resource(name),
        LifecycleEvent::Stop => registry.stop_resource(name),
        LifecycleEvent::Delete => registry.delete_resource(name, true),
        LifecycleEvent::Create => unreachable!("create is never replayed"),
    }
}

proptest! {
    #[test]
    fn transitions_follow_table(events in prop::collection::vec(arbitrary_event(), 0..20)) {
        let mut registry = registry();
        registry
            .create_resource("AppService", "app", &app_raw("python", "EastUS", 1))
            .unwrap();

        for event in events {
            let before = registry.get("app").unwrap().state();
            let history_before = registry.get("app").unwrap().history().len();
            let records_before = registry.sink().len();

            let expected = before.on(&event);
            let result = apply(&mut registry, "app", event);
            let resource = registry.get("app").unwrap();

            match expected {
                Ok(next) => {
                    prop_assert_eq!(result, Ok(next));
                    prop_assert_eq!(resource.state(), next);
                    prop_assert_eq!(resource.history().len(), history_before + 1);
                    prop_assert_eq!(registry.sink().len(), records_before + 1);
                }
                Err(rejection) => {
                    prop_assert_eq!(result, Err(Error::Transition(rejection)));
                    prop_assert_eq!(resource.state(), before);
                    prop_assert_eq!(resource.history().len(), history_before);
                    prop_assert_eq!(registry.sink().len(), records_before);
                }
            }
        }
    }

    #[test]
    fn deleted_is_absorbing(events in prop::collection::vec(arbitrary_event(), 0..10)) {
        let mut registry = registry();
        registry
            .create_resource("CacheDB", "cache", &cache_raw(60, 128, "LRU"))
            .unwrap();
        registry.delete_resource("cache", true).unwrap();

        for event in events {
            prop_assert!(apply(&mut registry, "cache", event).is_err());
            let resource = registry.get("cache").unwrap();
            prop_assert!(resource.state().is_final());
            prop_assert_eq!(resource.history().len(), 2);
        }
    }

    #[test]
    fn history_path_ends_at_current_state(
        events in prop::collection::vec(arbitrary_event(), 0..20)
    ) {
        let mut registry = registry();
        registry
            .create_resource("AppService", "app", &app_raw("dotnet", "CentralIndia", 3))
            .unwrap();
        for event in events {
            let _ = apply(&mut registry, "app", event);
        }

        let resource = registry.get("app").unwrap();
        let path = resource.history().get_path();
        prop_assert_eq!(path[0], &ResourceState::Created);
        prop_assert_eq!(*path[path.len() - 1], resource.state());
        prop_assert!(resource.history().transitions()[0].is_initial());
    }

    #[test]
    fn valid_app_service_is_created(raw in valid_app()) {
        let mut registry = registry();
        let resource = registry.create_resource("AppService", "app", &raw).unwrap();
        prop_assert_eq!(resource.state(), ResourceState::Created);
    }

    #[test]
    fn valid_storage_account_is_created(raw in valid_storage()) {
        let mut registry = registry();
        let resource = registry.create_resource("StorageAccount", "store", &raw).unwrap();
        prop_assert_eq!(resource.state(), ResourceState::Created);
    }

    #[test]
    fn valid_cache_is_created(raw in valid_cache()) {
        let mut registry = registry();
        let resource = registry.create_resource("CacheDB", "cache", &raw).unwrap();
        prop_assert_eq!(resource.state(), ResourceState::Created);
    }

    #[test]
    fn out_of_range_replicas_names_field(replicas in prop_oneof![-100..=0i64, 4..=100i64]) {
        let mut registry = registry();
        let err = registry
            .create_resource("AppService", "app", &app_raw("python", "EastUS", replicas))
            .unwrap_err();

        match err {
            Error::Validation(err) => prop_assert_eq!(err.field, "replicas"),
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
        prop_assert!(!registry.contains("app"));
        prop_assert!(registry.sink().is_empty());
    }

    #[test]
    fn short_access_key_names_field(key in "[a-z]{0,7}") {
        let mut registry = registry();
        let err = registry
            .create_resource("StorageAccount", "store", &storage_raw("yes", &key, 10))
            .unwrap_err();

        match err {
            Error::Validation(err) => prop_assert_eq!(err.field, "accessKey"),
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
        prop_assert!(!registry.contains("store"));
    }

    #[test]
    fn out_of_range_ttl_names_field(ttl in prop_oneof![0..60i64, 86_401..200_000i64]) {
        let mut registry = registry();
        let err = registry
            .create_resource("CacheDB", "cache", &cache_raw(ttl, 256, "FIFO"))
            .unwrap_err();

        match err {
            Error::Validation(err) => prop_assert_eq!(err.field, "ttlSeconds"),
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
        prop_assert!(!registry.contains("cache"));
    }

    #[test]
    fn single_violation_names_field_and_stores_nothing(
        (tag, raw, field) in single_violation()
    ) {
        let mut registry = registry();
        let err = registry.create_resource(tag, "res", &raw).unwrap_err();

        match err {
            Error::Validation(err) => prop_assert_eq!(err.field, field),
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
        prop_assert!(!registry.contains("res"));
        prop_assert_eq!(registry.count(true), 0);
        prop_assert!(registry.sink().is_empty());
    }

    #[test]
    fn reads_never_mutate(events in prop::collection::vec(arbitrary_event(), 0..10)) {
        let mut registry = registry();
        registry
            .create_resource("AppService", "app", &app_raw("nodejs", "WestEurope", 2))
            .unwrap();
        for event in events {
            let _ = apply(&mut registry, "app", event);
        }

        let before = registry.snapshot_json().unwrap();
        let records = registry.sink().len();
        let _ = registry.get("app");
        let _ = registry.get("missing");
        let _ = registry.list_all();
        let _ = registry.names(false);
        prop_assert_eq!(registry.snapshot_json().unwrap(), before);
        prop_assert_eq!(registry.sink().len(), records);
    }

    #[test]
    fn names_stay_taken_after_deletion(name in "[a-z][a-z0-9]{0,11}") {
        let mut registry = registry();
        registry
            .create_resource("CacheDB", &name, &cache_raw(300, 256, "LFU"))
            .unwrap();
        registry.delete_resource(&name, true).unwrap();

        let err = registry
            .create_resource("AppService", &name, &app_raw("python", "EastUS", 1))
            .unwrap_err();
        prop_assert_eq!(err, Error::DuplicateName(name.clone()));
        prop_assert_eq!(registry.count(true), 1);
    }

    #[test]
    fn unconfirmed_delete_always_fails(events in prop::collection::vec(arbitrary_event(), 0..10)) {
        let mut registry = registry();
        registry
            .create_resource("AppService", "app", &app_raw("python", "EastUS", 1))
            .unwrap();
        for event in events {
            let _ = apply(&mut registry, "app", event);
        }

        let state = registry.get("app").unwrap().state();
        let history = registry.get("app").unwrap().history().len();

        prop_assert_eq!(
            registry.delete_resource("app", false),
            Err(Error::DeletionNotConfirmed("app".into()))
        );
        prop_assert_eq!(registry.get("app").unwrap().state(), state);
        prop_assert_eq!(registry.get("app").unwrap().history().len(), history);
    }
}
