//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存命中/未命中的上报组件，由各缓存实现以组合方式持有。

use super::{CacheId, CacheKey, CacheValue};
use crate::events::{self, CacheEvent, CACHE_HIT, CACHE_MISS};
use crate::metrics::GLOBAL_METRICS;
use std::sync::Arc;
use tracing::debug;

/// 命中/未命中上报器
///
/// 每次 `get_value` 查询存储后，缓存实现必须恰好调用一次
/// [`EventReporter::report_hit`] 或 [`EventReporter::report_miss`]。
#[derive(Debug, Clone)]
pub struct EventReporter {
    /// 所属缓存实例标识
    id: CacheId,
    /// 所属缓存名称
    name: Arc<str>,
}

impl EventReporter {
    /// 为缓存实例创建上报器
    pub(crate) fn new(name: &str) -> Self {
        Self {
            id: CacheId::new(),
            name: Arc::from(name),
        }
    }

    /// 所属缓存实例标识
    pub fn id(&self) -> CacheId {
        self.id
    }

    /// 所属缓存名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 上报命中
    pub fn report_hit<K: CacheKey, V: CacheValue>(&self, key: &K, value: &V) {
        debug!("cache hit: cache={}, key={:?}", self.name, key);
        GLOBAL_METRICS.record_request(&self.name, "get", "hit");
        let event = CacheEvent::hit(self.id, Arc::clone(&self.name), key.clone(), value.clone());
        events::trigger(CACHE_HIT, &event);
    }

    /// 上报未命中
    pub fn report_miss<K: CacheKey>(&self, key: &K) {
        debug!("cache miss: cache={}, key={:?}", self.name, key);
        GLOBAL_METRICS.record_request(&self.name, "get", "miss");
        let event = CacheEvent::miss(self.id, Arc::clone(&self.name), key.clone());
        events::trigger(CACHE_MISS, &event);
    }
}
