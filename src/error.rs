//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存系统的错误类型和处理机制。

use thiserror::Error;

/// 加载函数可返回的任意错误类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 缓存读取错误类型枚举
///
/// 两种变体都携带请求的键，调用方可以统一通过 [`CacheError::key`] 取回。
#[derive(Error, Debug)]
pub enum CacheError<K> {
    /// 缓存未命中且没有可用的回源函数
    ///
    /// 这是正常的"未找到"信号，不代表故障。
    #[error("cache miss for key {0:?}")]
    Miss(K),

    /// 回源函数自身失败，缓存原样透传
    #[error("load failed for key {key:?}: {source}")]
    Load {
        /// 请求的键
        key: K,
        /// 回源函数给出的原始错误
        #[source]
        source: BoxError,
    },
}

impl<K> CacheError<K> {
    /// 以任意错误构造回源失败
    pub fn load(key: K, source: impl Into<BoxError>) -> Self {
        CacheError::Load {
            key,
            source: source.into(),
        }
    }

    /// 返回失败所对应的键
    pub fn key(&self) -> &K {
        match self {
            CacheError::Miss(key) => key,
            CacheError::Load { key, .. } => key,
        }
    }

    /// 取出失败所对应的键
    pub fn into_key(self) -> K {
        match self {
            CacheError::Miss(key) => key,
            CacheError::Load { key, .. } => key,
        }
    }

    /// 是否为普通的未命中
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Miss(_))
    }
}

/// 缓存读取结果类型别名
pub type Result<T, K> = std::result::Result<T, CacheError<K>>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML 解析失败
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// 配置内容不合法
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// 按名称查找缓存失败
    #[error("Cache not found: {0}")]
    NotFound(String),
}
