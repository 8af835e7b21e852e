//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存系统的指标收集和监控功能。

use dashmap::DashMap;
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{span, Level};

/// 指标收集器
///
/// 用于收集缓存读取的命中、未命中和回源结果
#[derive(Clone, Debug)]
pub struct Metrics {
    /// 请求总数统计
    /// key: (cache, op, result)
    pub requests_total: Arc<DashMap<(String, String, String), u64>>,
    /// 是否启用收集
    enabled: Arc<AtomicBool>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            requests_total: Arc::new(DashMap::new()),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

lazy_static! {
    /// 全局指标实例
    pub static ref GLOBAL_METRICS: Metrics = Metrics::default();
}

impl Metrics {
    /// 记录请求指标
    ///
    /// # 参数
    ///
    /// * `cache` - 缓存名称
    /// * `op` - 操作类型（get/load）
    /// * `result` - 操作结果（hit/miss/success/failure）
    pub fn record_request(&self, cache: &str, op: &str, result: &str) {
        if !self.is_enabled() {
            return;
        }
        let span = span!(Level::TRACE, "cache_request", cache, op, result);
        let _enter = span.enter();
        let key = (cache.to_string(), op.to_string(), result.to_string());
        *self.requests_total.entry(key).or_insert(0) += 1;
    }

    /// 读取某个计数
    pub fn request_count(&self, cache: &str, op: &str, result: &str) -> u64 {
        let key = (cache.to_string(), op.to_string(), result.to_string());
        self.requests_total.get(&key).map(|v| *v).unwrap_or(0)
    }

    /// 启用或关闭收集
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// 是否启用收集
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// 清空所有计数（仅用于测试）
    #[doc(hidden)]
    pub fn reset(&self) {
        self.requests_total.clear();
    }
}

/// 获取指标字符串
///
/// 将所有指标格式化为字符串返回，用于监控系统采集
///
/// # 返回值
///
/// 返回包含所有指标的字符串，按标签排序
pub fn get_metrics_string() -> String {
    let mut entries: Vec<((String, String, String), u64)> = GLOBAL_METRICS
        .requests_total
        .iter()
        .map(|e| (e.key().clone(), *e.value()))
        .collect();
    entries.sort();

    let mut output = String::new();
    for ((cache, op, result), v) in entries {
        output.push_str(&format!(
            "cache_requests_total{{cache=\"{}\", operation=\"{}\", result=\"{}\"}} {}\n",
            cache, op, result, v
        ));
    }
    output
}
