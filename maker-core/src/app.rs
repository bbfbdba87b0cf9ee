use std::sync::Arc;
use std::time::Instant;

use crate::config::{ApplicationConfig, DEFAULT_CONFIG_FILE};
use crate::container::{Container, ContainerBuilder};
use crate::descriptor::{Annotated, SharedBean};
use crate::discovery::ComponentDiscovery;
use crate::error::ApplicationResult;
use crate::lifecycle::BeanPostProcessor;
use crate::logging::LoggingConfig;

/// Maker 应用程序
///
/// 提供便捷的应用启动方式：加载配置、初始化日志、构建容器。
///
/// ```no_run
/// use maker_core::MakerApplication;
/// # use maker_core::{Annotated, Annotation};
/// # struct AppConfig;
/// # impl Annotated for AppConfig {
/// #     fn type_name(&self) -> &str { "AppConfig" }
/// #     fn annotations(&self) -> Vec<Annotation> {
/// #         vec![Annotation::ComponentScan("app::service".into())]
/// #     }
/// # }
///
/// let container = MakerApplication::new("order-app")
///     .config_file("config/application.toml")
///     .run(&AppConfig)
///     .expect("application failed to start");
/// ```
pub struct MakerApplication {
    /// 应用名称（优先于配置文件中的名称）
    name: Option<String>,

    /// 配置文件路径
    config_file: String,

    /// 是否显示 banner（优先于配置文件）
    show_banner: Option<bool>,

    /// 日志配置（优先于配置文件）
    logging_config: Option<LoggingConfig>,

    /// 是否安装全局日志订阅者
    install_logging: bool,

    builder: ContainerBuilder,
}

impl MakerApplication {
    /// 创建新的应用
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 设置配置文件路径
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = path.into();
        self
    }

    /// 设置是否显示 banner
    pub fn banner(mut self, show: bool) -> Self {
        self.show_banner = Some(show);
        self
    }

    /// 设置日志配置
    ///
    /// 如果不设置，使用配置文件的 `[logging]` 段并由环境变量覆盖
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 是否由应用安装日志订阅者（已自行安装时传 false）
    pub fn install_logging(mut self, install: bool) -> Self {
        self.install_logging = install;
        self
    }

    /// 添加 BeanPostProcessor
    pub fn post_processor(mut self, processor: Arc<dyn BeanPostProcessor>) -> Self {
        self.builder = self.builder.post_processor(processor);
        self
    }

    /// 替换组件发现机制
    pub fn discovery(mut self, discovery: Arc<dyn ComponentDiscovery>) -> Self {
        self.builder = self.builder.discovery(discovery);
        self
    }

    /// 注册外部单例
    pub fn singleton(mut self, name: impl Into<String>, bean: SharedBean) -> Self {
        self.builder = self.builder.singleton(name, bean);
        self
    }

    /// 运行应用
    pub fn run(self, root: &dyn Annotated) -> ApplicationResult<Arc<Container>> {
        let config = ApplicationConfig::load(&self.config_file)?;

        // 初始化日志系统
        if self.install_logging {
            let logging_config = self
                .logging_config
                .clone()
                .unwrap_or_else(|| config.logging.clone().with_env_overrides());
            logging_config.init()?;
        }

        let start_time = Instant::now();

        let name = self
            .name
            .clone()
            .unwrap_or_else(|| config.application.name.clone());

        if self.show_banner.unwrap_or(config.application.banner) {
            print_banner();
        }

        tracing::info!("Starting {} application", name);
        tracing::debug!("Root configuration: {}", root.type_name());

        let container = self.builder.build(root)?;

        for failure in container.startup_failures() {
            tracing::warn!(
                "Singleton '{}' is unavailable: {}",
                failure.bean_name,
                failure.error
            );
        }

        tracing::info!(
            "Started {} in {}ms",
            name,
            start_time.elapsed().as_millis()
        );

        Ok(Arc::new(container))
    }
}

impl Default for MakerApplication {
    /// 名称取自配置文件的 `[application] name`
    fn default() -> Self {
        Self {
            name: None,
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            show_banner: None,
            logging_config: None,
            install_logging: true,
            builder: Container::builder(),
        }
    }
}

/// 打印 banner
fn print_banner() {
    println!();
    println!(r"  __  __       _             ");
    println!(r" |  \/  | __ _| | _____ _ __ ");
    println!(r" | |\/| |/ _` | |/ / _ \ '__|");
    println!(r" | |  | | (_| |   <  __/ |   ");
    println!(r" |_|  |_|\__,_|_|\_\___|_|   ");
    println!();
    println!("  :: Maker ::        (v{})", env!("CARGO_PKG_VERSION"));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::StaticDiscovery;
    use crate::error::{ApplicationError, ContainerError};
    use crate::testing::{TestDescriptor, TestRoot};

    fn app() -> MakerApplication {
        MakerApplication::new("test-app")
            .config_file("missing-application.toml")
            .banner(false)
            .install_logging(false)
    }

    #[test]
    fn test_run_builds_container() {
        let discovery = StaticDiscovery::new()
            .with_descriptor("app", TestDescriptor::new("orderService").shared());

        let container = app()
            .discovery(Arc::new(discovery))
            .run(&TestRoot(Some("app")))
            .unwrap();

        assert!(container.contains_singleton("orderService"));
        assert!(container.startup_failures().is_empty());
    }

    #[test]
    fn test_run_with_external_singleton() {
        let discovery = StaticDiscovery::new().with_descriptor(
            "app",
            TestDescriptor::new("consumer").inject("clock", "clock").shared(),
        );

        let container = app()
            .discovery(Arc::new(discovery))
            .singleton("clock", Arc::new(42_u64))
            .run(&TestRoot(Some("app")))
            .unwrap();

        assert!(container.contains_singleton("consumer"));
        assert!(container.startup_failures().is_empty());
    }

    #[test]
    fn test_invalid_scope_fails_startup() {
        let discovery = StaticDiscovery::new()
            .with_descriptor("app", TestDescriptor::new("odd").scope("session").shared());

        let err = app()
            .discovery(Arc::new(discovery))
            .run(&TestRoot(Some("app")))
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Container(ContainerError::InvalidScope { .. })
        ));
    }
}
