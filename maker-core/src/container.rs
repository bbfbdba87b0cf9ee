use std::fmt;
use std::sync::Arc;

use crate::bean::BeanDefinition;
use crate::bean_factory::BeanFactory;
use crate::descriptor::{Annotated, SharedBean};
use crate::discovery::{ComponentDiscovery, InventoryDiscovery};
use crate::engine::{BeanLifecycleEngine, DependencyResolver};
use crate::error::{ContainerError, ContainerResult};
use crate::lifecycle::BeanPostProcessor;
use crate::registry::BeanDefinitionRegistry;
use crate::scanner::ComponentScanner;
use crate::singleton::SingletonCache;
use crate::utils::dependency::CreationChain;
use crate::Scope;

/// 启动阶段预创建失败的单例
#[derive(Debug)]
pub struct StartupFailure {
    pub bean_name: String,
    pub error: ContainerError,
}

/// 容器 - 扫描组件、预创建单例并按名称提供 Bean
///
/// 注册表、单例缓存和生命周期引擎都归这一个值所有，随它创建和销毁。
pub struct Container {
    /// Bean 定义存储
    registry: BeanDefinitionRegistry,

    /// 单例 Bean 缓存
    singletons: SingletonCache,

    /// 实例化流水线
    engine: BeanLifecycleEngine,

    /// 启动时失败的单例（启动不会因此中止）
    startup_failures: Vec<StartupFailure>,
}

impl Container {
    /// 使用默认的 inventory 发现机制创建容器
    pub fn new(root: &dyn Annotated) -> ContainerResult<Self> {
        Self::builder().build(root)
    }

    /// 构建器模式创建容器
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// 通过名称获取 Bean
    pub fn get_bean(&self, name: &str) -> ContainerResult<SharedBean> {
        let mut chain = CreationChain::new();
        self.resolve(name, &mut chain)
    }

    /// 把外部创建的对象注册为单例
    ///
    /// 该名称可被注入，但不会出现在 Bean 定义注册表中。
    pub fn register_singleton(
        &self,
        name: impl Into<String>,
        bean: SharedBean,
    ) -> ContainerResult<()> {
        let name = name.into();
        if self.singletons.contains(&name) {
            return Err(ContainerError::SingletonAlreadyExists(name));
        }
        self.singletons.insert(&name, bean);
        tracing::debug!("Registered external singleton '{}'", name);
        Ok(())
    }

    /// 单例缓存中是否已有该名称
    pub fn contains_singleton(&self, name: &str) -> bool {
        self.singletons.contains(name)
    }

    pub fn contains_bean_definition(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn bean_definition(&self, name: &str) -> Option<Arc<BeanDefinition>> {
        self.registry.get(name)
    }

    /// 所有 Bean 定义的名称
    pub fn bean_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn bean_definition_count(&self) -> usize {
        self.registry.len()
    }

    pub fn singleton_count(&self) -> usize {
        self.singletons.len()
    }

    /// 已缓存的单例或单例定义
    pub fn is_singleton(&self, name: &str) -> ContainerResult<bool> {
        if self.singletons.contains(name) {
            return Ok(true);
        }
        self.scope_of(name).map(|scope| scope == Scope::Singleton)
    }

    pub fn is_prototype(&self, name: &str) -> ContainerResult<bool> {
        if self.singletons.contains(name) {
            return Ok(false);
        }
        self.scope_of(name).map(|scope| scope == Scope::Prototype)
    }

    pub fn startup_failures(&self) -> &[StartupFailure] {
        &self.startup_failures
    }

    pub fn post_processors(&self) -> &[Arc<dyn BeanPostProcessor>] {
        self.engine.post_processors()
    }

    fn scope_of(&self, name: &str) -> ContainerResult<Scope> {
        self.registry
            .get(name)
            .map(|definition| definition.scope())
            .ok_or_else(|| ContainerError::UnknownBean(name.to_string()))
    }

    /// 预创建所有非延迟的单例
    ///
    /// 单个 Bean 失败只记录下来，其余 Bean 继续创建。
    fn preinstantiate_singletons(&self) -> Vec<StartupFailure> {
        let mut names: Vec<String> = self
            .registry
            .names()
            .into_iter()
            .filter(|name| {
                self.registry
                    .get(name)
                    .is_some_and(|definition| definition.is_eager_singleton())
            })
            .collect();
        names.sort();

        tracing::debug!("Pre-instantiating {} singleton bean(s)", names.len());

        let mut failures = Vec::new();
        for name in names {
            if self.singletons.contains(&name) {
                tracing::trace!("Singleton '{}' already created as a dependency", name);
                continue;
            }
            if let Err(error) = self.get_bean(&name) {
                tracing::error!("Failed to pre-instantiate singleton '{}': {}", name, error);
                failures.push(StartupFailure {
                    bean_name: name,
                    error,
                });
            }
        }
        failures
    }
}

impl DependencyResolver for Container {
    fn resolve(&self, name: &str, chain: &mut CreationChain) -> ContainerResult<SharedBean> {
        tracing::trace!("Requesting bean: '{}'", name);

        // 检查缓存
        if let Some(bean) = self.singletons.get(name) {
            tracing::debug!("Returning cached instance of singleton bean '{}'", name);
            return Ok(bean);
        }

        let definition = self.registry.get(name).ok_or_else(|| {
            tracing::debug!("Bean '{}' not found in container", name);
            ContainerError::UnknownBean(name.to_string())
        })?;

        match definition.scope() {
            Scope::Singleton => self.singletons.get_or_create(name, || {
                let mut frame = chain.enter(name)?;
                tracing::info!("Creating shared instance of singleton bean '{}'", name);
                let bean = self.engine.create(name, &definition, self, &mut frame)?;
                tracing::debug!("Singleton bean '{}' created and cached", name);
                Ok(bean)
            }),
            Scope::Prototype => {
                let mut frame = chain.enter(name)?;
                tracing::debug!("Creating new instance of prototype bean '{}'", name);
                self.engine.create(name, &definition, self, &mut frame)
            }
        }
    }
}

impl BeanFactory for Container {
    fn get_bean(&self, name: &str) -> ContainerResult<SharedBean> {
        Container::get_bean(self, name)
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains(name) || self.singletons.contains(name)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("singletons", &self.singletons)
            .field("engine", &self.engine)
            .field("startup_failures", &self.startup_failures.len())
            .finish()
    }
}

/// 容器构建器
pub struct ContainerBuilder {
    discovery: Arc<dyn ComponentDiscovery>,
    engine: BeanLifecycleEngine,
    singletons: Vec<(String, SharedBean)>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            discovery: Arc::new(InventoryDiscovery::new()),
            engine: BeanLifecycleEngine::new(),
            singletons: Vec::new(),
        }
    }

    /// 替换组件发现协作者
    pub fn discovery(mut self, discovery: Arc<dyn ComponentDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    /// 添加 BeanPostProcessor（按 order 排序）
    pub fn post_processor(mut self, processor: Arc<dyn BeanPostProcessor>) -> Self {
        self.engine.add_post_processor(processor);
        self
    }

    /// 预先放入单例缓存的外部对象，扫描后、预创建前写入
    pub fn singleton(mut self, name: impl Into<String>, bean: SharedBean) -> Self {
        self.singletons.push((name.into(), bean));
        self
    }

    /// 扫描根配置并预创建单例
    pub fn build(self, root: &dyn Annotated) -> ContainerResult<Container> {
        let mut container = Container {
            registry: BeanDefinitionRegistry::new(),
            singletons: SingletonCache::new(),
            engine: self.engine,
            startup_failures: Vec::new(),
        };

        ComponentScanner::new(self.discovery).scan(root, &container.registry)?;

        for (name, bean) in self.singletons {
            container.register_singleton(name, bean)?;
        }

        tracing::info!("Initializing non-lazy singleton beans");
        container.startup_failures = container.preinstantiate_singletons();

        if container.startup_failures.is_empty() {
            tracing::info!(
                "Container initialized: {} bean definition(s), {} singleton(s) created",
                container.bean_definition_count(),
                container.singleton_count()
            );
        } else {
            tracing::warn!(
                "Container initialized with {} failed singleton(s)",
                container.startup_failures.len()
            );
        }

        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean_factory::BeanFactoryExt;
    use crate::discovery::StaticDiscovery;
    use crate::testing::{TestBean, TestDescriptor, TestRoot};
    use std::sync::atomic::{AtomicBool, Ordering};

    const PACKAGE: &str = "com.maker.service";

    fn build(discovery: StaticDiscovery) -> Container {
        Container::builder()
            .discovery(Arc::new(discovery))
            .build(&TestRoot(Some(PACKAGE)))
            .unwrap()
    }

    #[test]
    fn test_singleton_identity() {
        let container = build(
            StaticDiscovery::new().with_descriptor(PACKAGE, TestDescriptor::new("orderService").shared()),
        );

        let first = container.get_bean("orderService").unwrap();
        let second = container.get_bean("orderService").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_prototype_instances_are_distinct() {
        let discovery = StaticDiscovery::new()
            .with_descriptor(
                PACKAGE,
                TestDescriptor::new("task")
                    .scope("prototype")
                    .inject("step", "step")
                    .shared(),
            )
            .with_descriptor(PACKAGE, TestDescriptor::new("step").scope("prototype").shared());
        let container = build(discovery);

        assert_eq!(container.singleton_count(), 0);

        let first = container.get_bean("task").unwrap();
        let second = container.get_bean("task").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        let first_step = first.downcast_ref::<TestBean>().unwrap().dependency("step").unwrap();
        let second_step = second.downcast_ref::<TestBean>().unwrap().dependency("step").unwrap();
        assert!(!Arc::ptr_eq(first_step, second_step));
        assert!(!container.contains_singleton("task"));
    }

    #[test]
    fn test_eager_and_lazy_singletons() {
        let order = TestDescriptor::new("orderService");
        let order_count = order.instantiation_counter();
        let user = TestDescriptor::new("userService")
            .lazy()
            .inject("order_service", "orderService");
        let user_count = user.instantiation_counter();

        let container = build(
            StaticDiscovery::new()
                .with_descriptor(PACKAGE, user.shared())
                .with_descriptor(PACKAGE, order.shared()),
        );

        assert!(container.contains_singleton("orderService"));
        assert!(!container.contains_singleton("userService"));
        assert_eq!(order_count.load(Ordering::SeqCst), 1);
        assert_eq!(user_count.load(Ordering::SeqCst), 0);

        let user_bean = container.get_bean("userService").unwrap();
        assert!(container.contains_singleton("userService"));

        let injected = user_bean
            .downcast_ref::<TestBean>()
            .unwrap()
            .dependency("order_service")
            .unwrap();
        let order_bean = container.get_bean("orderService").unwrap();
        assert!(Arc::ptr_eq(injected, &order_bean));
        assert_eq!(order_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_dependency_created_for_eager_dependent() {
        let discovery = StaticDiscovery::new()
            .with_descriptor(PACKAGE, TestDescriptor::new("eager").inject("lazy", "lazyOne").shared())
            .with_descriptor(PACKAGE, TestDescriptor::new("lazyOne").lazy().shared());
        let container = build(discovery);

        assert!(container.contains_singleton("eager"));
        assert!(container.contains_singleton("lazyOne"));
    }

    #[test]
    fn test_unknown_bean() {
        let container = build(StaticDiscovery::new());
        let err = container.get_bean("nothing").unwrap_err();
        assert!(matches!(err, ContainerError::UnknownBean(ref n) if n == "nothing"));
        assert!(container.is_singleton("nothing").is_err());
    }

    #[test]
    fn test_startup_is_best_effort() {
        let discovery = StaticDiscovery::new()
            .with_descriptor(PACKAGE, TestDescriptor::new("broken").inject("x", "x").shared())
            .with_descriptor(PACKAGE, TestDescriptor::new("healthy").shared());
        let container = build(discovery);

        assert!(container.contains_singleton("healthy"));
        assert!(!container.contains_singleton("broken"));

        let failures = container.startup_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].bean_name, "broken");
        assert!(matches!(
            failures[0].error,
            ContainerError::UnresolvedDependency { ref dependency, .. } if dependency == "x"
        ));
    }

    #[test]
    fn test_failed_initialization_is_retried_from_scratch() {
        let fail_init = Arc::new(AtomicBool::new(true));
        let descriptor = TestDescriptor::new("flaky").lazy().init_switch(Arc::clone(&fail_init));
        let count = descriptor.instantiation_counter();
        let container = build(StaticDiscovery::new().with_descriptor(PACKAGE, descriptor.shared()));

        let err = container.get_bean("flaky").unwrap_err();
        assert!(matches!(err, ContainerError::Initialization { .. }));
        assert!(!container.contains_singleton("flaky"));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        fail_init.store(false, Ordering::SeqCst);
        let bean = container.get_bean("flaky").unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(container.contains_singleton("flaky"));
        assert!(Arc::ptr_eq(&bean, &container.get_bean("flaky").unwrap()));
    }

    #[test]
    fn test_circular_dependency_fails_fast() {
        let discovery = StaticDiscovery::new()
            .with_descriptor(PACKAGE, TestDescriptor::new("a").lazy().inject("b", "b").shared())
            .with_descriptor(PACKAGE, TestDescriptor::new("b").lazy().inject("a", "a").shared());
        let container = build(discovery);

        match container.get_bean("a").unwrap_err() {
            ContainerError::CircularDependency { chain } => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("Expected CircularDependency, got {:?}", other),
        }
        assert_eq!(container.singleton_count(), 0);
    }

    #[test]
    fn test_prototype_self_reference_is_circular() {
        let discovery = StaticDiscovery::new().with_descriptor(
            PACKAGE,
            TestDescriptor::new("node").scope("prototype").inject("next", "node").shared(),
        );
        let container = build(discovery);

        let err = container.get_bean("node").unwrap_err();
        assert!(err.is_circular_dependency());
    }

    #[test]
    fn test_register_singleton() {
        let container = build(
            StaticDiscovery::new().with_descriptor(
                PACKAGE,
                TestDescriptor::new("consumer").lazy().inject("settings", "settings").shared(),
            ),
        );

        container
            .register_singleton("settings", Arc::new(String::from("debug=true")))
            .unwrap();
        assert!(matches!(
            container.register_singleton("settings", Arc::new(1_u8)),
            Err(ContainerError::SingletonAlreadyExists(_))
        ));

        let settings = container.get_bean_typed::<String>("settings").unwrap();
        assert_eq!(settings.as_str(), "debug=true");
        assert!(container.get_bean("consumer").is_ok());
        assert!(container.contains_bean("settings"));
        assert!(!container.contains_bean_definition("settings"));
        assert!(container.is_singleton("settings").unwrap());
    }

    #[test]
    fn test_get_bean_typed_mismatch() {
        let container = build(
            StaticDiscovery::new().with_descriptor(PACKAGE, TestDescriptor::new("orderService").shared()),
        );

        assert!(container.get_bean_typed::<TestBean>("orderService").is_ok());
        let err = container.get_bean_typed::<String>("orderService").unwrap_err();
        assert!(matches!(err, ContainerError::TypeMismatch { .. }));
    }

    #[test]
    fn test_bean_name_aware_receives_registered_name() {
        let container = build(
            StaticDiscovery::new().with_descriptor(PACKAGE, TestDescriptor::new("named").aware().shared()),
        );

        let bean = container.get_bean_typed::<TestBean>("named").unwrap();
        assert_eq!(bean.bean_name.as_deref(), Some("named"));
    }

    #[test]
    fn test_concurrent_lazy_singleton_built_once() {
        let descriptor = TestDescriptor::new("lazyService").lazy();
        let count = descriptor.instantiation_counter();
        let container = build(StaticDiscovery::new().with_descriptor(PACKAGE, descriptor.shared()));

        let beans: Vec<SharedBean> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| container.get_bean("lazyService").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(beans.iter().all(|b| Arc::ptr_eq(b, &beans[0])));
    }

    #[test]
    fn test_introspection() {
        let container = build(
            StaticDiscovery::new()
                .with_descriptor(PACKAGE, TestDescriptor::new("one").shared())
                .with_descriptor(PACKAGE, TestDescriptor::new("two").scope("prototype").shared()),
        );

        let mut names = container.bean_names();
        names.sort();
        assert_eq!(names, vec!["one", "two"]);
        assert_eq!(container.bean_definition_count(), 2);
        assert!(container.is_singleton("one").unwrap());
        assert!(container.is_prototype("two").unwrap());
        assert!(container.bean_definition("two").unwrap().is_prototype());
        assert!(container.post_processors().is_empty());
    }
}
