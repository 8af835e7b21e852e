//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存管理器，负责按配置创建并管理缓存实例。

use crate::client::{AlwaysEmptyCache, Cache, CacheKey, CacheValue, SimpleObjectCache};
use crate::config::{CacheKind, Config};
use crate::error::ConfigError;
use crate::metrics::GLOBAL_METRICS;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// 缓存管理器
///
/// 按名称持有同一键值类型的多个缓存实例
pub struct CacheManager<K: CacheKey, V: CacheValue> {
    caches: DashMap<String, Arc<dyn Cache<K, V>>>,
}

impl<K: CacheKey, V: CacheValue> CacheManager<K, V> {
    /// 创建空的缓存管理器
    pub fn new() -> Self {
        Self {
            caches: DashMap::new(),
        }
    }

    /// 根据配置创建缓存管理器
    ///
    /// # 参数
    ///
    /// * `config` - 缓存系统配置
    ///
    /// # 返回值
    ///
    /// 配置不合法时返回错误
    #[instrument(skip(config), level = "info", fields(cache_count = config.caches.len()))]
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        GLOBAL_METRICS.set_enabled(config.global.enable_metrics);

        let manager = Self::new();
        for (name, cache_cfg) in &config.caches {
            manager.insert(name, build_cache(name, cache_cfg.kind));
        }
        info!("CacheManager initialized with {} caches", manager.len());
        Ok(manager)
    }

    /// 注册缓存实例，同名时覆盖
    pub fn insert(&self, name: &str, cache: Arc<dyn Cache<K, V>>) {
        self.caches.insert(name.to_string(), cache);
    }

    /// 获取指定名称的缓存实例
    pub fn get(&self, name: &str) -> Result<Arc<dyn Cache<K, V>>, ConfigError> {
        self.caches
            .get(name)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// 移除指定名称的缓存实例
    pub fn remove(&self, name: &str) -> Option<Arc<dyn Cache<K, V>>> {
        self.caches.remove(name).map(|(_, cache)| cache)
    }

    /// 已注册的缓存名称
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// 已注册的缓存数量
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// 是否没有任何缓存
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

impl<K: CacheKey, V: CacheValue> Default for CacheManager<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// 按类型创建缓存实例
pub fn build_cache<K: CacheKey, V: CacheValue>(
    name: &str,
    kind: CacheKind,
) -> Arc<dyn Cache<K, V>> {
    match kind {
        CacheKind::AlwaysEmpty => Arc::new(AlwaysEmptyCache::with_name(name)),
        CacheKind::SimpleObject => Arc::new(SimpleObjectCache::with_name(name)),
    }
}
