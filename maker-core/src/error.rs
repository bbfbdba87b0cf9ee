//! 错误类型
//!
//! 容器内部使用 `ContainerError` 描述 Bean 创建过程中的失败，
//! 启动层使用 `ApplicationError` 包装日志、配置与容器错误。
//! 用户回调（实例化、`after_properties_set`、后置处理器）返回 `anyhow::Result`，
//! 由容器作为错误来源（source）保留下来。

use thiserror::Error;

/// 容器错误
#[derive(Debug, Error)]
pub enum ContainerError {
    /// 默认构造失败
    #[error("Failed to instantiate bean '{name}' of type '{type_name}': {source}")]
    Instantiation {
        name: String,
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// 按名称注入的依赖无法解析
    #[error("Bean '{bean}' could not resolve dependency '{dependency}': {source}")]
    UnresolvedDependency {
        bean: String,
        dependency: String,
        #[source]
        source: Box<ContainerError>,
    },

    /// 依赖已解析，但无法写入字段
    #[error("Failed to inject field '{field}' of bean '{bean}': {source}")]
    InjectionFailed {
        bean: String,
        field: String,
        #[source]
        source: anyhow::Error,
    },

    /// `InitializingBean::after_properties_set` 失败
    #[error("Initialization of bean '{name}' failed: {source}")]
    Initialization {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// BeanPostProcessor 失败
    #[error("BeanPostProcessor '{processor}' failed on bean '{name}': {source}")]
    PostProcessingFailed {
        name: String,
        processor: String,
        #[source]
        source: anyhow::Error,
    },

    /// 既没有定义也没有缓存的 Bean
    #[error("No bean named '{0}' is defined")]
    UnknownBean(String),

    /// 创建链中再次出现同一个 Bean
    #[error("Circular dependency detected: {}", chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },

    /// 扫描到无法识别的作用域
    #[error("Bean '{bean}' declares unknown scope '{value}'")]
    InvalidScope { bean: String, value: String },

    /// 组件发现失败
    #[error("Component discovery failed for package '{package}': {source}")]
    DiscoveryFailed {
        package: String,
        #[source]
        source: anyhow::Error,
    },

    /// 外部注册的单例名称已被占用
    #[error("Singleton '{0}' is already registered")]
    SingletonAlreadyExists(String),

    /// 按类型取 Bean 时类型不匹配
    #[error("Bean '{name}' is not of the requested type '{expected}'")]
    TypeMismatch { name: String, expected: String },
}

impl ContainerError {
    /// 是否为循环依赖错误（创建链中的上层不再包装它）
    pub fn is_circular_dependency(&self) -> bool {
        matches!(self, ContainerError::CircularDependency { .. })
    }
}

pub type ContainerResult<T> = std::result::Result<T, ContainerError>;

/// 应用启动错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),

    #[error("Failed to load configuration '{path}': {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    Container(#[from] ContainerError),
}

pub type ApplicationResult<T> = std::result::Result<T, ApplicationError>;
