use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::Scope;

/// Bean 定义 - 描述如何创建和管理 Bean
///
/// 存入注册表后只读，所有使用者共享同一个 `Arc<BeanDefinition>`。
#[derive(Clone)]
pub struct BeanDefinition {
    /// Bean 的类型描述符
    type_descriptor: Arc<dyn TypeDescriptor>,

    /// Bean 的作用域
    scope: Scope,

    /// 是否延迟初始化（仅对单例有效）
    lazy: bool,
}

impl BeanDefinition {
    /// 创建新的 Bean 定义（默认单例、非延迟）
    pub fn new(type_descriptor: Arc<dyn TypeDescriptor>) -> Self {
        Self {
            type_descriptor,
            scope: Scope::default(),
            lazy: false,
        }
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// 设置延迟初始化
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn type_descriptor(&self) -> &Arc<dyn TypeDescriptor> {
        &self.type_descriptor
    }

    pub fn type_name(&self) -> &str {
        self.type_descriptor.type_name()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn is_singleton(&self) -> bool {
        self.scope == Scope::Singleton
    }

    pub fn is_prototype(&self) -> bool {
        self.scope == Scope::Prototype
    }

    /// 容器启动时是否需要预先创建
    pub fn is_eager_singleton(&self) -> bool {
        self.is_singleton() && !self.lazy
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("type_name", &self.type_name())
            .field("scope", &self.scope)
            .field("lazy", &self.lazy)
            .finish()
    }
}
