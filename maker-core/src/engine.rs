//! Bean 生命周期引擎
//!
//! 把一个 BeanDefinition 变成完整初始化的实例，固定顺序：
//! 1. 实例化（默认构造）
//! 2. 属性填充（按字段名递归解析依赖）
//! 3. BeanNameAware 回调
//! 4. BeanPostProcessor.before → InitializingBean.after_properties_set → BeanPostProcessor.after
//! 5. 返回实例
//!
//! 任一步失败都会丢弃实例，调用方不会缓存半成品。

use std::sync::Arc;

use crate::bean::BeanDefinition;
use crate::descriptor::{Instance, SharedBean};
use crate::error::{ContainerError, ContainerResult};
use crate::lifecycle::BeanPostProcessor;
use crate::utils::dependency::CreationChain;

/// 依赖解析 - 属性填充阶段回调容器
pub trait DependencyResolver: Send + Sync {
    /// 在当前创建链上解析 Bean
    fn resolve(&self, name: &str, chain: &mut CreationChain) -> ContainerResult<SharedBean>;
}

#[derive(Default)]
pub struct BeanLifecycleEngine {
    /// Bean 后置处理器列表（按 order 升序）
    post_processors: Vec<Arc<dyn BeanPostProcessor>>,
}

impl BeanLifecycleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加后置处理器并保持按优先级排序
    pub fn add_post_processor(&mut self, processor: Arc<dyn BeanPostProcessor>) {
        tracing::debug!(
            "Registered BeanPostProcessor '{}' (order={})",
            processor.name(),
            processor.order()
        );
        self.post_processors.push(processor);
        // 稳定排序：order 相同时保持注册顺序
        self.post_processors.sort_by_key(|p| p.order());
    }

    pub fn post_processors(&self) -> &[Arc<dyn BeanPostProcessor>] {
        &self.post_processors
    }

    /// 创建 Bean 实例
    ///
    /// `chain` 必须已经包含 `name`，依赖解析会在其上继续压栈。
    pub fn create(
        &self,
        name: &str,
        definition: &BeanDefinition,
        resolver: &dyn DependencyResolver,
        chain: &mut CreationChain,
    ) -> ContainerResult<SharedBean> {
        let descriptor = definition.type_descriptor();
        tracing::trace!(
            "Creating instance of bean '{}' (type={}, depth={})",
            name,
            descriptor.type_name(),
            chain.depth()
        );

        // 1. 实例化
        let mut instance =
            descriptor
                .instantiate()
                .map_err(|source| ContainerError::Instantiation {
                    name: name.to_string(),
                    type_name: descriptor.type_name().to_string(),
                    source,
                })?;

        // 2. 属性填充
        for point in descriptor.injection_points() {
            tracing::trace!(
                "  ├─ Injecting '{}' into field '{}' of '{}'",
                point.bean_name,
                point.field,
                name
            );

            let dependency = resolver
                .resolve(&point.bean_name, chain)
                .map_err(|e| {
                    // 保留循环依赖错误，不要包装它
                    if e.is_circular_dependency() {
                        e
                    } else {
                        ContainerError::UnresolvedDependency {
                            bean: name.to_string(),
                            dependency: point.bean_name.clone(),
                            source: Box::new(e),
                        }
                    }
                })?;

            instance
                .set_field(point.field, dependency)
                .map_err(|source| ContainerError::InjectionFailed {
                    bean: name.to_string(),
                    field: point.field.to_string(),
                    source,
                })?;
        }

        // 3. Aware 回调
        if let Some(aware) = instance.as_bean_name_aware() {
            aware.set_bean_name(name);
        }

        // 4. 初始化，前后由后置处理器包围
        self.apply_before_initialization(&mut *instance, name)?;

        if let Some(initializing) = instance.as_initializing_bean() {
            initializing
                .after_properties_set()
                .map_err(|source| {
                    tracing::warn!("Initialization of bean '{}' failed: {}", name, source);
                    ContainerError::Initialization {
                        name: name.to_string(),
                        source,
                    }
                })?;
        }

        self.apply_after_initialization(&mut *instance, name)?;

        // 5. 返回
        Ok(instance.into_shared())
    }

    fn apply_before_initialization(
        &self,
        bean: &mut dyn Instance,
        bean_name: &str,
    ) -> ContainerResult<()> {
        for processor in &self.post_processors {
            processor
                .post_process_before_initialization(bean, bean_name)
                .map_err(|source| ContainerError::PostProcessingFailed {
                    name: bean_name.to_string(),
                    processor: processor.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    fn apply_after_initialization(
        &self,
        bean: &mut dyn Instance,
        bean_name: &str,
    ) -> ContainerResult<()> {
        for processor in &self.post_processors {
            processor
                .post_process_after_initialization(bean, bean_name)
                .map_err(|source| ContainerError::PostProcessingFailed {
                    name: bean_name.to_string(),
                    processor: processor.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BeanLifecycleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.post_processors.iter().map(|p| p.name()).collect();
        f.debug_struct("BeanLifecycleEngine")
            .field("post_processors", &names)
            .finish()
    }
}
