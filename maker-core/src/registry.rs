//! Bean 定义注册表

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::bean::BeanDefinition;

/// Bean 名称到 Bean 定义的映射
///
/// 读写都经过 `RwLock`，允许并发扫描；重复名称以后注册者为准。
#[derive(Debug, Default)]
pub struct BeanDefinitionRegistry {
    definitions: RwLock<HashMap<String, Arc<BeanDefinition>>>,
}

impl BeanDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记 Bean 定义，返回被覆盖的旧定义
    pub fn put(
        &self,
        name: impl Into<String>,
        definition: BeanDefinition,
    ) -> Option<Arc<BeanDefinition>> {
        let name = name.into();
        let previous = self
            .definitions
            .write()
            .insert(name.clone(), Arc::new(definition));

        if let Some(ref old) = previous {
            tracing::warn!(
                "Bean definition '{}' ({}) overridden by a later registration",
                name,
                old.type_name()
            );
        } else {
            tracing::debug!("Bean definition registered: '{}'", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<Arc<BeanDefinition>> {
        self.definitions.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.read().contains_key(name)
    }

    /// 所有 Bean 名称（顺序不固定）
    pub fn names(&self) -> Vec<String> {
        self.definitions.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}
