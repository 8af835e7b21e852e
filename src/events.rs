//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了全局缓存事件总线，用于把缓存实例与命中/未命中观察者解耦。
//!
//! 监听器按事件名称注册，触发时按注册顺序同步调用。单个监听器 panic 会被
//! 捕获并记录，不影响其余监听器，也不会中断触发它的缓存操作。
//!
//! 触发前会对监听器列表做快照，调用期间不持有任何总线锁，因此监听器内部
//! 可以再次调用 `on`/`off`/`trigger` 或任意缓存操作；在一次投递过程中新增或
//! 移除的监听器从下一次触发开始生效。

use crate::client::CacheId;
use dashmap::DashMap;
use lazy_static::lazy_static;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// 缓存命中事件名称
pub const CACHE_HIT: &str = "cacheHit";

/// 缓存未命中事件名称
pub const CACHE_MISS: &str = "cacheMiss";

/// 监听器回调类型
pub type Listener = Arc<dyn Fn(&CacheEvent) + Send + Sync>;

/// 监听器句柄，用于注销
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// 缓存事件载荷
///
/// 键和值以类型擦除的方式携带，通过 [`CacheEvent::key`] 和
/// [`CacheEvent::value`] 按具体类型取回。
#[derive(Clone)]
pub struct CacheEvent {
    /// 触发事件的缓存实例标识，与该实例的 `Cache::id()` 相等
    pub cache: CacheId,
    /// 触发事件的缓存名称
    pub cache_name: Arc<str>,
    key: Arc<dyn Any + Send + Sync>,
    value: Option<Arc<dyn Any + Send + Sync>>,
}

impl CacheEvent {
    /// 构造未命中事件载荷
    pub fn miss<K>(cache: CacheId, cache_name: Arc<str>, key: K) -> Self
    where
        K: Any + Send + Sync,
    {
        Self {
            cache,
            cache_name,
            key: Arc::new(key),
            value: None,
        }
    }

    /// 构造命中事件载荷
    pub fn hit<K, V>(cache: CacheId, cache_name: Arc<str>, key: K, value: V) -> Self
    where
        K: Any + Send + Sync,
        V: Any + Send + Sync,
    {
        Self {
            cache,
            cache_name,
            key: Arc::new(key),
            value: Some(Arc::new(value)),
        }
    }

    /// 按类型取回键，类型不符时返回 None
    pub fn key<K: Any>(&self) -> Option<&K> {
        self.key.downcast_ref::<K>()
    }

    /// 按类型取回命中值；未命中事件或类型不符时返回 None
    pub fn value<V: Any>(&self) -> Option<&V> {
        self.value.as_ref().and_then(|v| v.downcast_ref::<V>())
    }

    /// 是否携带命中值
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Debug for CacheEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEvent")
            .field("cache", &self.cache)
            .field("cache_name", &self.cache_name)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}

/// 单次触发的投递结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// 被调用的监听器数量
    pub invoked: usize,
    /// 其中 panic 的数量
    pub failed: usize,
}

/// 事件总线
///
/// 事件名称到有序监听器列表的映射
#[derive(Default)]
pub struct EventBus {
    listeners: DashMap<String, Vec<(ListenerHandle, Listener)>>,
}

/// 句柄编号在所有总线间共享
static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

lazy_static! {
    /// 进程级事件总线
    pub static ref EVENT_BUS: EventBus = EventBus::new();
}

impl EventBus {
    /// 创建空的事件总线
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册监听器
    ///
    /// # 参数
    ///
    /// * `event_name` - 事件名称
    /// * `handler` - 触发时调用的回调
    ///
    /// # 返回值
    ///
    /// 返回用于注销的句柄
    pub fn on<F>(&self, event_name: &str, handler: F) -> ListenerHandle
    where
        F: Fn(&CacheEvent) + Send + Sync + 'static,
    {
        let handle = ListenerHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .entry(event_name.to_string())
            .or_default()
            .push((handle, Arc::new(handler)));
        debug!("EventBus on: event={}, handle={:?}", event_name, handle);
        handle
    }

    /// 注销监听器，句柄未知或已注销时什么也不做
    pub fn off(&self, event_name: &str, handle: ListenerHandle) {
        let now_empty = match self.listeners.get_mut(event_name) {
            Some(mut list) => {
                list.retain(|(h, _)| *h != handle);
                list.is_empty()
            }
            None => return,
        };
        if now_empty {
            self.listeners
                .remove_if(event_name, |_, list| list.is_empty());
        }
        debug!("EventBus off: event={}, handle={:?}", event_name, handle);
    }

    /// 触发事件
    ///
    /// 按注册顺序同步调用当前所有监听器。
    ///
    /// # 返回值
    ///
    /// 返回被调用与失败的监听器数量
    #[instrument(skip(self, payload), level = "trace")]
    pub fn trigger(&self, event_name: &str, payload: &CacheEvent) -> Delivery {
        // 快照后立即释放分片锁
        let snapshot: Vec<Listener> = match self.listeners.get(event_name) {
            Some(list) => list.iter().map(|(_, l)| Arc::clone(l)).collect(),
            None => return Delivery::default(),
        };

        let mut delivery = Delivery::default();
        for listener in snapshot {
            delivery.invoked += 1;
            if catch_unwind(AssertUnwindSafe(|| listener(payload))).is_err() {
                delivery.failed += 1;
                warn!(
                    "EventBus: listener panicked, event={}, cache={}",
                    event_name, payload.cache_name
                );
            }
        }
        delivery
    }

    /// 当前某事件的监听器数量
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .get(event_name)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    /// 清除所有监听器
    ///
    /// 注意：此方法用于测试隔离，不应在生产代码中调用。
    #[doc(hidden)]
    pub fn reset(&self) {
        self.listeners.clear();
    }
}

/// 在全局总线上注册监听器
pub fn on<F>(event_name: &str, handler: F) -> ListenerHandle
where
    F: Fn(&CacheEvent) + Send + Sync + 'static,
{
    EVENT_BUS.on(event_name, handler)
}

/// 从全局总线注销监听器
pub fn off(event_name: &str, handle: ListenerHandle) {
    EVENT_BUS.off(event_name, handle)
}

/// 在全局总线上触发事件
pub fn trigger(event_name: &str, payload: &CacheEvent) -> Delivery {
    EVENT_BUS.trigger(event_name, payload)
}

/// 全局总线上某事件的监听器数量
pub fn listener_count(event_name: &str) -> usize {
    EVENT_BUS.listener_count(event_name)
}

/// 清除全局总线上的所有监听器（仅用于测试）
#[doc(hidden)]
pub fn reset() {
    EVENT_BUS.reset()
}
