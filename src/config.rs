//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存系统的配置结构和解析逻辑。

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

pub const CONFIG_VERSION: u32 = 1;

/// 缓存名称的最大长度
pub const MAX_CACHE_NAME_LENGTH: usize = 64;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub config_version: Option<u32>,
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub caches: HashMap<String, CacheConfig>,
}

/// 全局配置
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GlobalConfig {
    /// 是否启用指标收集
    pub enable_metrics: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
        }
    }
}

/// 单个缓存实例的配置
#[derive(Deserialize, Clone, Debug, Default)]
pub struct CacheConfig {
    /// 缓存类型
    #[serde(default)]
    pub kind: CacheKind,
}

/// 缓存类型枚举
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    /// 永远为空，所有读取都走回源
    AlwaysEmpty,
    /// 基于内存映射
    #[default]
    SimpleObject,
}

impl Config {
    /// 从TOML字符串解析并验证配置
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    ///
    /// 检查配置版本和缓存名称
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(version) = self.config_version {
            if version > CONFIG_VERSION {
                return Err(ConfigError::Invalid(format!(
                    "Configuration version {} is not supported. Current version is {}.",
                    version, CONFIG_VERSION
                )));
            }
        }

        for name in self.caches.keys() {
            if name.is_empty() {
                return Err(ConfigError::Invalid("Cache name cannot be empty".to_string()));
            }

            if name.len() > MAX_CACHE_NAME_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "Cache name '{}' exceeds maximum length of {} characters",
                    name, MAX_CACHE_NAME_LENGTH
                )));
            }
        }

        Ok(())
    }
}
