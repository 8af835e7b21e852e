//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 永远为空的缓存集成测试

#[path = "../common/mod.rs"]
mod common;

use common::{counting_loader, failing_loader, fresh_bus};
use eventcache::client::loader::constant;
use eventcache::{events, AlwaysEmptyCache, Cache, CacheError, CacheExt, CACHE_HIT, CACHE_MISS};
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

/// 测试不带回源函数的读取总是失败并携带键
#[tokio::test]
#[serial]
async fn test_never_returns_cached_value() {
    fresh_bus();
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();

    let result = c.get("something".to_string()).await;

    match result {
        Err(CacheError::Miss(key)) => assert_eq!(key, "something"),
        other => panic!("expected miss, got {:?}", other),
    }
}

/// 测试设置值后读取依然未命中
#[tokio::test]
#[serial]
async fn test_set_value_is_ignored() {
    fresh_bus();
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();

    c.set_value("key".to_string(), 1);
    c.delete_value(&"key".to_string());
    let err = c.get("key".to_string()).await.unwrap_err();

    assert!(err.is_miss());
    assert_eq!(err.key(), "key");
}

/// 测试返回回源函数的结果
#[tokio::test]
#[serial]
async fn test_uses_load_function_result() {
    fresh_bus();
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();

    let value = c
        .get_or_load("something".to_string(), &constant::<String, i32>(5))
        .await
        .unwrap();

    assert_eq!(value, 5);
}

/// 测试每次读取都会调用回源函数
#[tokio::test]
#[serial]
async fn test_load_function_invoked_every_time() {
    fresh_bus();
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();
    let (loader, calls) = counting_loader(7);

    for _ in 0..3 {
        assert_eq!(c.get_or_load("k".to_string(), &loader).await.unwrap(), 7);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

/// 测试回源错误原样透传
#[tokio::test]
#[serial]
async fn test_load_failure_propagated() {
    fresh_bus();
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();

    let err = c
        .get_or_load("k".to_string(), &failing_loader("backend down"))
        .await
        .unwrap_err();

    match err {
        CacheError::Load { key, source } => {
            assert_eq!(key, "k");
            assert_eq!(source.to_string(), "backend down");
        }
        other => panic!("expected load failure, got {:?}", other),
    }
}

/// 测试产生未命中事件，且载荷指向触发的实例和键
#[tokio::test]
#[serial]
async fn test_generates_cache_miss_event() {
    fresh_bus();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handle = events::on(CACHE_MISS, move |evt| {
        let key = evt.key::<String>().cloned();
        sink.lock().unwrap().push((evt.cache, key, evt.has_value()));
    });
    let hits = Arc::new(Mutex::new(0));
    let hit_sink = Arc::clone(&hits);
    let hit_handle = events::on(CACHE_HIT, move |_| *hit_sink.lock().unwrap() += 1);
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();

    let _ = c.get("actualKey".to_string()).await;

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, vec![(c.id(), Some("actualKey".to_string()), false)]);
    assert_eq!(*hits.lock().unwrap(), 0);

    events::off(CACHE_MISS, handle);
    events::off(CACHE_HIT, hit_handle);
}

/// 测试未命中事件先于回源函数调用
#[tokio::test]
#[serial]
async fn test_miss_reported_before_load() {
    fresh_bus();
    let order = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&order);
    let handle = events::on(CACHE_MISS, move |_| log.lock().unwrap().push("miss"));
    let c: AlwaysEmptyCache<String, i32> = AlwaysEmptyCache::new();

    let log = Arc::clone(&order);
    let loader = move |_key: String| {
        log.lock().unwrap().push("load");
        async { Ok::<i32, CacheError<String>>(1) }
    };
    c.get_or_load("k".to_string(), &loader).await.unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["miss", "load"]);
    events::off(CACHE_MISS, handle);
}
