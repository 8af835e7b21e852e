//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基于内存映射的简单缓存实现。

use super::{Cache, CacheId, CacheKey, CacheValue, DefaultLoadFn, EventReporter, LoadFn};
use crate::error::Result;
use crate::metrics::GLOBAL_METRICS;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};

/// 简单对象缓存
///
/// 以独占的内存映射作为存储，没有淘汰、过期和容量限制。
/// 是否命中只看键是否存在，与值本身无关，`None`、`0`、空集合都算命中。
pub struct SimpleObjectCache<K: CacheKey, V: CacheValue> {
    reporter: EventReporter,
    storage: DashMap<K, V>,
}

impl<K: CacheKey, V: CacheValue> SimpleObjectCache<K, V> {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::with_name("simple_object")
    }

    /// 以指定名称创建空缓存
    pub fn with_name(name: &str) -> Self {
        Self {
            reporter: EventReporter::new(name),
            storage: DashMap::new(),
        }
    }

    /// 以调用方提供的初始数据创建缓存
    pub fn with_storage<I>(name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            reporter: EventReporter::new(name),
            storage: entries.into_iter().collect(),
        }
    }

    /// 键是否存在
    pub fn contains_key(&self, key: &K) -> bool {
        self.storage.contains_key(key)
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// 是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// 清空所有条目
    pub fn clear(&self) {
        debug!("SimpleObjectCache clear: cache={}", self.reporter.name());
        self.storage.clear();
    }
}

impl<K: CacheKey, V: CacheValue> Default for SimpleObjectCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: CacheKey, V: CacheValue> Cache<K, V> for SimpleObjectCache<K, V> {
    #[instrument(skip(self, load_fn), level = "debug", fields(cache = %self.reporter.name()))]
    async fn get_value(&self, key: K, load_fn: Option<&dyn LoadFn<K, V>>) -> Result<V, K> {
        // 先克隆出值再上报，避免监听器回调时仍持有分片锁
        let cached = self.storage.get(&key).map(|entry| entry.value().clone());
        if let Some(value) = cached {
            self.reporter.report_hit(&key, &value);
            return Ok(value);
        }

        self.reporter.report_miss(&key);
        let Some(load_fn) = load_fn else {
            return DefaultLoadFn.load(key).await;
        };

        match load_fn.load(key.clone()).await {
            Ok(value) => {
                GLOBAL_METRICS.record_request(self.reporter.name(), "load", "success");
                self.set_value(key, value.clone());
                Ok(value)
            }
            Err(e) => {
                GLOBAL_METRICS.record_request(self.reporter.name(), "load", "failure");
                debug!("SimpleObjectCache load failed: {}", e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self, value), level = "debug", fields(cache = %self.reporter.name()))]
    fn set_value(&self, key: K, value: V) {
        self.storage.insert(key, value);
    }

    #[instrument(skip(self), level = "debug", fields(cache = %self.reporter.name()))]
    fn delete_value(&self, key: &K) {
        if self.storage.remove(key).is_some() {
            debug!("SimpleObjectCache delete: key={:?} removed", key);
        }
    }

    fn id(&self) -> CacheId {
        self.reporter.id()
    }

    fn name(&self) -> &str {
        self.reporter.name()
    }
}
