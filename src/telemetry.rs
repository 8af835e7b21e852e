//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了日志初始化功能。

use std::sync::Once;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG` 环境变量，未设置时使用 `default_filter`。
/// 重复调用不会产生效果；如果应用已设置了全局 subscriber，此函数也不会覆盖它。
///
/// # 参数
///
/// * `default_filter` - 默认过滤规则，例如 "debug" 或 "eventcache=trace"
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        tracing_subscriber::fmt()
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .ok();
    });
}
