//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了永远为空的缓存实现。

use super::{Cache, CacheId, CacheKey, CacheValue, DefaultLoadFn, EventReporter, LoadFn};
use crate::error::Result;
use crate::metrics::GLOBAL_METRICS;
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::instrument;

/// 永远为空的缓存
///
/// 不保存任何数据，每次读取都是未命中并完全交给回源函数处理。
/// 适用于透明地关闭缓存，或强制所有读取都走回源。
pub struct AlwaysEmptyCache<K, V> {
    reporter: EventReporter,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K: CacheKey, V: CacheValue> AlwaysEmptyCache<K, V> {
    /// 创建新的空缓存
    pub fn new() -> Self {
        Self::with_name("always_empty")
    }

    /// 以指定名称创建空缓存
    pub fn with_name(name: &str) -> Self {
        Self {
            reporter: EventReporter::new(name),
            _marker: PhantomData,
        }
    }
}

impl<K: CacheKey, V: CacheValue> Default for AlwaysEmptyCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: CacheKey, V: CacheValue> Cache<K, V> for AlwaysEmptyCache<K, V> {
    #[instrument(skip(self, load_fn), level = "debug", fields(cache = %self.reporter.name()))]
    async fn get_value(&self, key: K, load_fn: Option<&dyn LoadFn<K, V>>) -> Result<V, K> {
        self.reporter.report_miss(&key);
        let Some(load_fn) = load_fn else {
            return DefaultLoadFn.load(key).await;
        };
        let result = load_fn.load(key).await;
        let outcome = if result.is_ok() { "success" } else { "failure" };
        GLOBAL_METRICS.record_request(self.reporter.name(), "load", outcome);
        result
    }

    fn set_value(&self, _key: K, _value: V) {}

    fn delete_value(&self, _key: &K) {}

    fn id(&self) -> CacheId {
        self.reporter.id()
    }

    fn name(&self) -> &str {
        self.reporter.name()
    }
}
