// maker-core: 类似 Spring 的轻量级控制反转容器
//
// 提供按名称管理 Bean 的容器，支持：
// - 组件扫描（derive 宏在链接期登记组件）
// - 单例和原型作用域、延迟初始化
// - 按字段名的依赖注入与循环依赖检测
// - 生命周期回调（BeanNameAware / InitializingBean / BeanPostProcessor）

pub mod app;
pub mod bean;
pub mod bean_factory;
pub mod component;
pub mod config;
pub mod container;
pub mod descriptor;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod registry;
pub mod scanner;
pub mod scope;
pub mod singleton;
pub mod utils;

#[cfg(test)]
mod testing;

// 重新导出常用类型
pub use app::MakerApplication;
pub use bean::BeanDefinition;
pub use bean_factory::{BeanFactory, BeanFactoryExt};
pub use component::Component;
pub use config::ApplicationConfig;
pub use container::{Container, ContainerBuilder, StartupFailure};
pub use descriptor::{
    downcast_bean, unknown_field, Annotated, Annotation, InjectionPoint, Instance, SharedBean,
    TypeDescriptor,
};
pub use discovery::{
    ComponentDiscovery, ComponentRegistration, InventoryDiscovery, StaticDiscovery,
};
pub use engine::{BeanLifecycleEngine, DependencyResolver};
pub use error::{ApplicationError, ApplicationResult, ContainerError, ContainerResult};
pub use lifecycle::{BeanNameAware, BeanPostProcessor, InitializingBean};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use registry::BeanDefinitionRegistry;
pub use scanner::ComponentScanner;
pub use scope::Scope;
pub use singleton::SingletonCache;

// 导出 inventory 和 anyhow，供宏使用
pub use anyhow;
pub use inventory;

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::app::MakerApplication;
    pub use crate::bean_factory::{BeanFactory, BeanFactoryExt};
    pub use crate::component::Component;
    pub use crate::container::Container;
    pub use crate::descriptor::{Annotated, Instance, SharedBean};
    pub use crate::error::{ApplicationResult, ContainerError, ContainerResult};
    pub use crate::lifecycle::{BeanNameAware, BeanPostProcessor, InitializingBean};
    pub use crate::logging::{LogFormat, LogLevel, LoggingConfig};
    pub use crate::scope::Scope;
    pub use crate::utils;
    // Re-export anyhow for convenience
    pub use anyhow::{anyhow, Context};
}
