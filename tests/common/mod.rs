//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了测试的通用工具函数和设置。

use eventcache::error::CacheError;
use eventcache::events;
use eventcache::telemetry::init_tracing;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn setup_logging() {
    init_tracing("debug");
}

/// 初始化日志并清空全局事件总线
///
/// 使用全局总线的测试必须同时标注 `#[serial]`
#[allow(dead_code)]
pub fn fresh_bus() {
    setup_logging();
    events::reset();
}

/// 记录调用次数的回源函数
///
/// 返回回源函数和它的调用计数
#[allow(dead_code)]
pub fn counting_loader<V>(
    value: V,
) -> (
    impl Fn(String) -> futures::future::Ready<Result<V, CacheError<String>>> + Send + Sync,
    Arc<AtomicUsize>,
)
where
    V: Clone + Send + Sync + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let loader = move |_key: String| {
        counter.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(Ok(value.clone()))
    };
    (loader, calls)
}

/// 总是以回源错误失败的回源函数
#[allow(dead_code)]
pub fn failing_loader<V>(
    message: &'static str,
) -> impl Fn(String) -> futures::future::Ready<Result<V, CacheError<String>>> + Send + Sync
where
    V: Send + 'static,
{
    move |key: String| futures::future::ready(Err(CacheError::load(key, message)))
}
