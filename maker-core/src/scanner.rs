//! 组件扫描
//!
//! 读取根配置上的扫描路径，经发现协作者取得候选类型，
//! 把带组件标记的类型登记为 Bean 定义。

use std::sync::Arc;

use crate::bean::BeanDefinition;
use crate::descriptor::{Annotated, Annotation, TypeDescriptor};
use crate::discovery::ComponentDiscovery;
use crate::error::{ContainerError, ContainerResult};
use crate::registry::BeanDefinitionRegistry;
use crate::utils::naming::{simple_type_name, to_camel_case};
use crate::Scope;

/// 从组件标记中解析出的元数据
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComponentMetadata {
    name: String,
    scope: Scope,
    lazy: bool,
}

pub struct ComponentScanner {
    discovery: Arc<dyn ComponentDiscovery>,
}

impl ComponentScanner {
    pub fn new(discovery: Arc<dyn ComponentDiscovery>) -> Self {
        Self { discovery }
    }

    /// 扫描根配置声明的包并填充注册表，返回登记的组件数量
    ///
    /// 根配置没有扫描路径时什么也不做。
    pub fn scan(
        &self,
        root: &dyn Annotated,
        registry: &BeanDefinitionRegistry,
    ) -> ContainerResult<usize> {
        let Some(package) = root.component_scan() else {
            tracing::warn!(
                "'{}' has no component scan path, no beans will be registered",
                root.type_name()
            );
            return Ok(0);
        };

        tracing::info!("Starting component scan in package '{}'", package);

        let candidates = self
            .discovery
            .discover(&package)
            .map_err(|source| ContainerError::DiscoveryFailed {
                package: package.clone(),
                source,
            })?;

        let total = candidates.len();
        let mut registered = 0;

        for (idx, candidate) in candidates.into_iter().enumerate() {
            let Some(metadata) = read_metadata(candidate.as_ref())? else {
                tracing::trace!(
                    "Skipping candidate [{}/{}] '{}': no component marker",
                    idx + 1,
                    total,
                    candidate.type_name()
                );
                continue;
            };

            tracing::debug!(
                "Registering component [{}/{}]: '{}' (type={}, scope={}, lazy={})",
                idx + 1,
                total,
                metadata.name,
                candidate.type_name(),
                metadata.scope,
                metadata.lazy
            );

            let definition = BeanDefinition::new(candidate)
                .with_scope(metadata.scope)
                .with_lazy(metadata.lazy);
            registry.put(metadata.name, definition);
            registered += 1;
        }

        tracing::info!(
            "Component scan completed, registered {} bean(s) from {} candidate(s)",
            registered,
            total
        );
        Ok(registered)
    }
}

/// 读取组件标记；没有组件标记时返回 `None`
fn read_metadata(candidate: &dyn TypeDescriptor) -> ContainerResult<Option<ComponentMetadata>> {
    let annotations = candidate.annotations();

    let Some(declared_name) = annotations.iter().find_map(|a| match a {
        Annotation::Component(name) => Some(name.as_str()),
        _ => None,
    }) else {
        return Ok(None);
    };

    let name = if declared_name.trim().is_empty() {
        to_camel_case(simple_type_name(candidate.type_name()))
    } else {
        declared_name.to_string()
    };

    let scope = match annotations.iter().find_map(|a| match a {
        Annotation::Scope(value) => Some(value),
        _ => None,
    }) {
        Some(value) => value.parse().map_err(|_| ContainerError::InvalidScope {
            bean: name.clone(),
            value: value.clone(),
        })?,
        None => Scope::default(),
    };

    let lazy = annotations.iter().any(|a| matches!(a, Annotation::Lazy));

    Ok(Some(ComponentMetadata { name, scope, lazy }))
}
