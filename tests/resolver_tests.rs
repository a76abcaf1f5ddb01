//! Resolver tests covering the full decision table: found/absent values,
//! default and required policy, prefix override, region routing and error
//! propagation.

mod common;

use common::{FailingStore, MemoryStore};
use ssmtpl::{ResolveError, Resolver, StoreError};

#[tokio::test]
async fn found_value_is_returned() {
    let store = MemoryStore::new().with("env/db", "postgres").into_arc();
    let resolver = Resolver::new(store, "env/");

    let value = resolver.resolve::<&str>("db", &[]).await.unwrap();
    assert_eq!(value, "postgres");
}

#[tokio::test]
async fn found_value_wins_over_default() {
    let store = MemoryStore::new().with("env/db", "postgres").into_arc();
    let resolver = Resolver::new(store, "env/");

    let value = resolver.resolve("db", &["default=sqlite"]).await.unwrap();
    assert_eq!(value, "postgres");
}

#[tokio::test]
async fn missing_required_parameter_fails_naming_path() {
    let store = MemoryStore::new().into_arc();
    let resolver = Resolver::new(store, "env/");

    let err = resolver.resolve::<&str>("db", &[]).await.unwrap_err();
    match err {
        ResolveError::MissingParameter { path } => assert_eq!(path, "env/db"),
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_with_default_returns_default() {
    let store = MemoryStore::new().into_arc();
    let resolver = Resolver::new(store, "env/");

    let value = resolver.resolve("db", &["default=sqlite"]).await.unwrap();
    assert_eq!(value, "sqlite");
}

#[tokio::test]
async fn missing_with_default_and_required_false_returns_default() {
    let store = MemoryStore::new().into_arc();
    let resolver = Resolver::new(store, "env/");

    let value = resolver
        .resolve("db", &["default=sqlite", "required=false"])
        .await
        .unwrap();
    assert_eq!(value, "sqlite");
}

#[tokio::test]
async fn missing_optional_returns_empty_string() {
    let store = MemoryStore::new().into_arc();
    let resolver = Resolver::new(store, "env/");

    let value = resolver.resolve("db", &["required=false"]).await.unwrap();
    assert_eq!(value, "");
}

#[tokio::test]
async fn prefix_option_overrides_default_prefix_entirely() {
    let store = MemoryStore::new().with("custom/db", "mysql").into_arc();
    let resolver = Resolver::new(store.clone(), "env/");

    let value = resolver.resolve("db", &["prefix=custom/"]).await.unwrap();
    assert_eq!(value, "mysql");

    // The lookup went to custom/db, not env/custom/db or env/db.
    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "custom/db");
}

#[tokio::test]
async fn default_prefix_is_used_without_prefix_option() {
    let store = MemoryStore::new().with("env/db", "postgres").into_arc();
    let resolver = Resolver::new(store.clone(), "env/");

    resolver.resolve::<&str>("db", &[]).await.unwrap();
    assert_eq!(store.calls()[0].path, "env/db");
}

#[tokio::test]
async fn region_option_scopes_a_single_call() {
    let store = MemoryStore::new()
        .with("env/db", "postgres")
        .with("env/cache", "redis")
        .into_arc();
    let resolver = Resolver::new(store.clone(), "env/");

    resolver.resolve("db", &["region=eu-west-1"]).await.unwrap();
    resolver.resolve::<&str>("cache", &[]).await.unwrap();

    let calls = store.calls();
    assert_eq!(calls[0].region.as_deref(), Some("eu-west-1"));
    assert_eq!(calls[1].region, None);
}

#[tokio::test]
async fn decryption_is_always_requested() {
    let store = MemoryStore::new().with("env/db", "postgres").into_arc();
    let resolver = Resolver::new(store.clone(), "env/");

    resolver.resolve::<&str>("db", &[]).await.unwrap();
    resolver.resolve("db", &["required=false"]).await.unwrap();

    assert!(store.calls().iter().all(|call| call.decrypt));
}

#[tokio::test]
async fn store_access_error_propagates_unchanged() {
    let resolver = Resolver::new(FailingStore::access_denied(), "env/");

    let err = resolver.resolve::<&str>("db", &[]).await.unwrap_err();
    match err {
        ResolveError::Store(StoreError::AccessDenied { path, message }) => {
            assert_eq!(path, "env/db");
            assert_eq!(message, "explicit deny in IAM policy");
        }
        other => panic!("expected AccessDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn store_throttling_error_propagates_unchanged() {
    let resolver = Resolver::new(FailingStore::throttled(), "env/");

    let err = resolver.resolve::<&str>("db", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Store(StoreError::Throttled { .. })
    ));
}

#[tokio::test]
async fn malformed_option_fails_before_any_store_call() {
    let store = MemoryStore::new().into_arc();
    let resolver = Resolver::new(store.clone(), "env/");

    let err = resolver
        .resolve("db", &["default=x", "region"])
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Options(_)));
    assert!(err.to_string().contains("region"));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn empty_prefix_means_bare_parameter_name() {
    let store = MemoryStore::new().with("db", "postgres").into_arc();
    let resolver = Resolver::new(store.clone(), "");

    let value = resolver.resolve::<&str>("db", &[]).await.unwrap();
    assert_eq!(value, "postgres");
    assert_eq!(store.calls()[0].path, "db");
}
