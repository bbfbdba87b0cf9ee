use std::sync::Arc;

use crate::descriptor::TypeDescriptor;

/// Component trait - 可被容器扫描和管理的组件类型
///
/// 通过 #[derive(Component)] 宏自动实现，同时向 inventory 登记描述符
///
/// # 示例
///
/// ```ignore
/// use maker_core::prelude::*;
/// use maker_core_macros::Component;
/// use std::sync::Arc;
///
/// #[derive(Component, Default)]
/// #[component("userService")]
/// #[scope("singleton")]
/// #[lazy]
/// struct UserService {
///     #[autowired]
///     order_service: Option<Arc<OrderService>>,
/// }
/// ```
pub trait Component: Sized + Send + Sync + 'static {
    /// 组件的类型描述符
    fn descriptor() -> Arc<dyn TypeDescriptor>;
}
