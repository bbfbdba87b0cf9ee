//! 类型描述符 - 容器与组件类型之间的边界
//!
//! 容器本身不做反射：读取标记、默认构造、按字段名赋值都通过这里的 trait 完成。
//! `#[derive(Component)]` / `#[derive(Configuration)]` 会为类型生成对应实现，
//! 也可以手写实现（例如测试或显式注册）。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::lifecycle::{BeanNameAware, InitializingBean};

/// 已构建完成、可被共享的 Bean 实例
pub type SharedBean = Arc<dyn Any + Send + Sync>;

/// 类型上的能力标记
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// 根配置上的扫描路径
    ComponentScan(String),
    /// 组件标记，值为 Bean 名称
    Component(String),
    /// 作用域标记，值原样保留，由扫描器解析
    Scope(String),
    /// 延迟初始化标记
    Lazy,
}

/// 可读取标记的类型
pub trait Annotated: Send + Sync {
    /// 类型名称（用于日志和默认 Bean 名称）
    fn type_name(&self) -> &str;

    /// 类型上的全部标记
    fn annotations(&self) -> Vec<Annotation>;

    /// 扫描路径标记的值
    fn component_scan(&self) -> Option<String> {
        self.annotations().into_iter().find_map(|a| match a {
            Annotation::ComponentScan(path) => Some(path),
            _ => None,
        })
    }
}

/// 带注入标记的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPoint {
    /// 结构体中的字段名
    pub field: &'static str,
    /// 要解析的 Bean 名称
    pub bean_name: String,
}

impl InjectionPoint {
    pub fn new(field: &'static str, bean_name: impl Into<String>) -> Self {
        Self {
            field,
            bean_name: bean_name.into(),
        }
    }
}

/// 组件类型描述符
pub trait TypeDescriptor: Annotated {
    /// 需要按名称注入的字段
    fn injection_points(&self) -> Vec<InjectionPoint>;

    /// 通过默认构造创建零值实例
    fn instantiate(&self) -> anyhow::Result<Box<dyn Instance>>;
}

impl fmt::Debug for dyn TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// 正在构建中的 Bean 实例
///
/// 生命周期引擎只通过字段名赋值和可选能力访问实例，从不读取业务状态。
pub trait Instance: Send + Sync + 'static {
    /// 按字段名写入已解析的依赖
    fn set_field(&mut self, field: &str, value: SharedBean) -> anyhow::Result<()>;

    /// `BeanNameAware` 能力
    fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
        None
    }

    /// `InitializingBean` 能力
    fn as_initializing_bean(&mut self) -> Option<&mut dyn InitializingBean> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 构建结束后转为共享实例
    fn into_shared(self: Box<Self>) -> SharedBean;
}

impl dyn Instance {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// 把共享 Bean 还原为具体类型，供生成的 `set_field` 使用
pub fn downcast_bean<T: Any + Send + Sync>(
    field: &str,
    value: SharedBean,
) -> anyhow::Result<Arc<T>> {
    value.downcast::<T>().map_err(|_| {
        anyhow::anyhow!(
            "field '{}' expects a bean of type '{}'",
            field,
            std::any::type_name::<T>()
        )
    })
}

/// 未知字段名的统一错误
pub fn unknown_field(type_name: &str, field: &str) -> anyhow::Error {
    anyhow::anyhow!("type '{}' has no injectable field '{}'", type_name, field)
}
