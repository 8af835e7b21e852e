//! 回源加载函数
//!
//! 提供缓存未命中时加载数据的接口。任何 `Fn(K) -> Future<Output = Result<V, CacheError<K>>>`
//! 的闭包都可直接作为回源函数使用。

use super::{CacheKey, CacheValue};
use crate::error::{CacheError, Result};
use async_trait::async_trait;
use futures::future::{self, Ready};
use std::future::Future;

/// 回源加载特征
///
/// 成功时返回加载到的值；失败时错误中必须携带原始键
#[async_trait]
pub trait LoadFn<K: CacheKey, V: CacheValue>: Send + Sync {
    /// 根据键加载数据
    async fn load(&self, key: K) -> Result<V, K>;
}

#[async_trait]
impl<K, V, F, Fut> LoadFn<K, V> for F
where
    K: CacheKey,
    V: CacheValue,
    F: Fn(K) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, K>> + Send + 'static,
{
    async fn load(&self, key: K) -> Result<V, K> {
        (self)(key).await
    }
}

/// 默认回源函数
///
/// 调用方没有提供回源函数时使用，立即以 [`CacheError::Miss`] 失败，
/// 使"无回源"和"有回源"两条未命中路径合并为一条。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLoadFn;

#[async_trait]
impl<K: CacheKey, V: CacheValue> LoadFn<K, V> for DefaultLoadFn {
    async fn load(&self, key: K) -> Result<V, K> {
        Err(CacheError::Miss(key))
    }
}

/// 总是返回同一个值（的克隆）的回源函数
pub fn constant<K, V>(value: V) -> impl Fn(K) -> Ready<Result<V, K>> + Send + Sync
where
    K: CacheKey,
    V: CacheValue,
{
    move |_key| future::ready(Ok(value.clone()))
}
