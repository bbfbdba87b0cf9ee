//! Bean Factory - 容器对外的查询接口

use std::any::Any;
use std::sync::Arc;

use crate::descriptor::SharedBean;
use crate::error::{ContainerError, ContainerResult};

/// BeanFactory - 最基础的容器接口
///
/// 注意：此 trait 不包含泛型方法，因此可以作为 trait object 使用
pub trait BeanFactory: Send + Sync {
    /// 通过名称获取 Bean
    fn get_bean(&self, name: &str) -> ContainerResult<SharedBean>;

    /// 检查是否包含指定名称的 Bean（定义或已缓存的单例）
    fn contains_bean(&self, name: &str) -> bool;
}

/// BeanFactoryExt - BeanFactory 的扩展 trait
///
/// 提供泛型方法，不能作为 trait object 使用
pub trait BeanFactoryExt: BeanFactory {
    /// 通过名称获取 Bean 并转换为具体类型
    fn get_bean_typed<T: Any + Send + Sync>(&self, name: &str) -> ContainerResult<Arc<T>> {
        self.get_bean(name)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
            })
    }
}

impl<F: BeanFactory + ?Sized> BeanFactoryExt for F {}
