//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存客户端的接口和实现。

pub mod always_empty;
pub mod loader;
pub mod reporter;
pub mod simple_object;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::hash::Hash;
use tracing::instrument;
use uuid::Uuid;

pub use always_empty::AlwaysEmptyCache;
pub use loader::{DefaultLoadFn, LoadFn};
pub use reporter::EventReporter;
pub use simple_object::SimpleObjectCache;

/// 缓存键约束
pub trait CacheKey: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static {}

/// 缓存值约束
///
/// 值在读取时被克隆；需要共享同一份数据时使用 `Arc<T>` 作为值类型。
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Clone + Send + Sync + 'static {}

/// 缓存实例标识
///
/// 事件载荷中的 `cache` 字段与触发它的实例的 [`Cache::id`] 相等。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheId(Uuid);

impl CacheId {
    /// 生成新的实例标识
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CacheId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 缓存操作特征
///
/// 定义所有缓存实现共享的基本操作接口
#[async_trait]
pub trait Cache<K: CacheKey, V: CacheValue>: Send + Sync {
    /// 获取缓存值
    ///
    /// 查找存储并向全局事件总线报告一次命中或未命中；未命中时调用
    /// `load_fn`（未提供时使用 [`DefaultLoadFn`]）。
    ///
    /// # 参数
    ///
    /// * `key` - 缓存键
    /// * `load_fn` - 未命中时的回源函数
    ///
    /// # 返回值
    ///
    /// 返回缓存值或回源得到的值；失败时错误中携带键
    async fn get_value(&self, key: K, load_fn: Option<&dyn LoadFn<K, V>>) -> Result<V, K>;

    /// 设置缓存值，存在时覆盖
    fn set_value(&self, key: K, value: V);

    /// 删除缓存项，不存在时什么也不做
    fn delete_value(&self, key: &K);

    /// 实例标识
    fn id(&self) -> CacheId;

    /// 实例名称，用于日志和指标
    fn name(&self) -> &str;
}

/// 缓存扩展特征
///
/// 提供更简短的读取入口
#[async_trait]
pub trait CacheExt<K: CacheKey, V: CacheValue>: Cache<K, V> {
    /// 不带回源函数的读取
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, key: K) -> Result<V, K> {
        self.get_value(key, None).await
    }

    /// 带回源函数的读取
    #[instrument(skip(self, load_fn), level = "debug")]
    async fn get_or_load<L>(&self, key: K, load_fn: &L) -> Result<V, K>
    where
        L: LoadFn<K, V>,
    {
        self.get_value(key, Some(load_fn)).await
    }
}

impl<K: CacheKey, V: CacheValue, T: Cache<K, V> + ?Sized> CacheExt<K, V> for T {}
