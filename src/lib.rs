//! eventcache - 带回源和全局事件通知的异步键值缓存
//!
//! 提供统一的异步缓存接口、两种可互换的实现（永远为空的缓存和基于内存映射的缓存）、
//! 未命中时的回源加载与回填，以及进程级的命中/未命中事件总线。

#![doc(html_root_url = "https://docs.rs/eventcache/0.1.0")]

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod manager;
pub mod metrics;
pub mod telemetry;

// Re-export commonly used items
pub use client::{
    AlwaysEmptyCache, Cache, CacheExt, CacheId, DefaultLoadFn, LoadFn, SimpleObjectCache,
};
pub use config::Config;
pub use error::{CacheError, ConfigError};
pub use events::{CacheEvent, ListenerHandle, CACHE_HIT, CACHE_MISS};
pub use manager::CacheManager;

/// eventcache 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
