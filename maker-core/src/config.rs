//! 应用配置
//!
//! 配置文件为 TOML，所有段和字段都可以省略：
//!
//! ```toml
//! [application]
//! name = "order-app"
//! banner = true
//!
//! [logging]
//! level = "debug"
//! format = "pretty"
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ApplicationError, ApplicationResult};
use crate::logging::LoggingConfig;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "application.toml";

/// `[application]` 段
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSection {
    /// 应用名称
    pub name: String,

    /// 启动时是否打印 banner
    pub banner: bool,
}

impl Default for ApplicationSection {
    fn default() -> Self {
        Self {
            name: "application".to_string(),
            banner: true,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub application: ApplicationSection,
    pub logging: LoggingConfig,
}

impl ApplicationConfig {
    /// 从文件加载配置
    ///
    /// 文件不存在时返回默认配置；读取或解析失败返回 `ApplicationError::Config`。
    pub fn load(path: impl AsRef<Path>) -> ApplicationResult<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Config file {:?} not found, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ApplicationError::Config {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let config = Self::parse(&content).map_err(|message| ApplicationError::Config {
            path: path.display().to_string(),
            message,
        })?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// 从字符串解析 TOML 配置
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
