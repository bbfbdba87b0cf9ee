//! 日志初始化
//!
//! 容器内部只调用 `tracing` 宏；是否安装订阅者由应用决定。

use std::str::FromStr;

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ApplicationError, ApplicationResult};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 紧凑格式（默认）
    #[default]
    Compact,
    /// 完整格式（带时间、级别、目标）
    Full,
    /// JSON 格式
    Json,
    /// 美化格式（适合开发）
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// 日志配置
///
/// 可以在 TOML 的 `[logging]` 段中声明，缺省字段取默认值。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（默认：Info）
    pub level: LogLevel,

    /// 日志格式（默认：Compact）
    pub format: LogFormat,

    /// 是否显示时间戳（默认：true）
    pub show_timestamp: bool,

    /// 是否显示目标（模块路径）（默认：false）
    pub show_target: bool,

    /// 是否显示线程 ID（默认：false）
    pub show_thread_ids: bool,

    /// 是否显示线程名（默认：false）
    pub show_thread_names: bool,

    /// 自定义过滤器（可选）
    /// 例如："maker_core=debug,app_demo=info"
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            show_timestamp: true,
            show_target: false,
            show_thread_ids: false,
            show_thread_names: false,
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    pub fn show_thread_names(mut self, show: bool) -> Self {
        self.show_thread_names = show;
        self
    }

    /// 设置自定义过滤器
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// 从环境变量读取配置
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖当前配置
    ///
    /// `RUST_LOG` 覆盖过滤器，`LOG_LEVEL` / `LOG_FORMAT` 覆盖级别与格式；
    /// 无法解析的值被忽略。
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.filter = Some(rust_log);
        }

        if let Ok(level_str) = std::env::var("LOG_LEVEL") {
            if let Ok(level) = level_str.parse() {
                self.level = level;
            }
        }

        if let Ok(format_str) = std::env::var("LOG_FORMAT") {
            if let Ok(format) = format_str.parse() {
                self.format = format;
            }
        }

        self
    }

    fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        match &self.filter {
            Some(filter) => EnvFilter::try_new(filter).unwrap_or_else(|_| fallback()),
            None => fallback(),
        }
    }

    /// 初始化日志系统
    ///
    /// 全局订阅者只能安装一次，重复调用返回 `LoggingInitFailed`。
    pub fn init(self) -> ApplicationResult<()> {
        let env_filter = self.env_filter();

        let result = match self.format {
            LogFormat::Compact => {
                let builder = fmt()
                    .with_env_filter(env_filter)
                    .compact()
                    .with_target(self.show_target)
                    .with_thread_ids(self.show_thread_ids)
                    .with_thread_names(self.show_thread_names);
                if self.show_timestamp {
                    builder.try_init()
                } else {
                    builder.without_time().try_init()
                }
            }
            LogFormat::Full => {
                let builder = fmt()
                    .with_env_filter(env_filter)
                    .with_target(self.show_target)
                    .with_thread_ids(self.show_thread_ids)
                    .with_thread_names(self.show_thread_names);
                if self.show_timestamp {
                    builder.try_init()
                } else {
                    builder.without_time().try_init()
                }
            }
            LogFormat::Json => fmt()
                .with_env_filter(env_filter)
                .json()
                .with_target(self.show_target)
                .try_init(),
            LogFormat::Pretty => fmt()
                .with_env_filter(env_filter)
                .pretty()
                .with_target(self.show_target)
                .try_init(),
        };

        result.map_err(|e| ApplicationError::LoggingInitFailed(e.to_string()))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Full => write!(f, "full"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}
