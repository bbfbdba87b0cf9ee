//! 组件发现
//!
//! 扫描器只依赖 `ComponentDiscovery`：给定包路径，返回候选类型描述符。
//! `InventoryDiscovery` 读取 `#[derive(Component)]` 在链接期提交的登记项，
//! `StaticDiscovery` 则由调用方显式列出组件。

use std::sync::Arc;

use crate::descriptor::TypeDescriptor;

/// 组件发现协作者
pub trait ComponentDiscovery: Send + Sync {
    /// 返回 `package` 下的全部候选类型
    fn discover(&self, package: &str) -> anyhow::Result<Vec<Arc<dyn TypeDescriptor>>>;
}

/// 描述符工厂函数类型
pub type DescriptorFactory = fn() -> Arc<dyn TypeDescriptor>;

/// Component 登记项 - 用于 inventory 收集
pub struct ComponentRegistration {
    /// 声明组件的模块路径（`module_path!()`）
    pub module_path: &'static str,
    /// 组件类型名
    pub type_name: &'static str,
    pub descriptor: DescriptorFactory,
}

impl ComponentRegistration {
    pub const fn new(
        module_path: &'static str,
        type_name: &'static str,
        descriptor: DescriptorFactory,
    ) -> Self {
        Self {
            module_path,
            type_name,
            descriptor,
        }
    }
}

inventory::collect!(ComponentRegistration);

/// 统一包路径写法：`com.maker.service` 与 `com::maker::service` 等价
pub fn normalize_package(package: &str) -> String {
    package.trim().replace("::", ".").trim_matches('.').to_string()
}

/// 模块是否位于包内（包本身或其子模块）
pub fn package_contains(package: &str, module_path: &str) -> bool {
    let package = normalize_package(package);
    let module = normalize_package(module_path);

    if package.is_empty() {
        return true;
    }
    module == package
        || module
            .strip_prefix(package.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
}

/// 基于 inventory 的发现实现
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryDiscovery;

impl InventoryDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl ComponentDiscovery for InventoryDiscovery {
    fn discover(&self, package: &str) -> anyhow::Result<Vec<Arc<dyn TypeDescriptor>>> {
        let mut found = Vec::new();
        for registration in inventory::iter::<ComponentRegistration> {
            if !package_contains(package, registration.module_path) {
                continue;
            }
            tracing::trace!(
                "  ├─ Found candidate: {} ({})",
                registration.type_name,
                registration.module_path
            );
            found.push((registration.descriptor)());
        }
        Ok(found)
    }
}

/// 显式登记的发现实现
#[derive(Default, Clone)]
pub struct StaticDiscovery {
    entries: Vec<(String, Arc<dyn TypeDescriptor>)>,
}

impl StaticDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 `package` 下登记一个描述符
    pub fn with_descriptor(
        mut self,
        package: impl Into<String>,
        descriptor: Arc<dyn TypeDescriptor>,
    ) -> Self {
        self.entries.push((package.into(), descriptor));
        self
    }

    /// 在 `package` 下登记一个组件类型
    pub fn with_component<C: crate::Component>(self, package: impl Into<String>) -> Self {
        self.with_descriptor(package, C::descriptor())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ComponentDiscovery for StaticDiscovery {
    fn discover(&self, package: &str) -> anyhow::Result<Vec<Arc<dyn TypeDescriptor>>> {
        Ok(self
            .entries
            .iter()
            .filter(|(declared, _)| package_contains(package, declared))
            .map(|(_, descriptor)| Arc::clone(descriptor))
            .collect())
    }
}
