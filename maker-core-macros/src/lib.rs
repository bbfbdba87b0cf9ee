mod attribute_helpers;
mod component_impl;
mod configuration_impl;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;

/// Component派生宏
///
/// 为类型生成描述符、按字段名注入的实现，并在链接期登记到组件清单，
/// 被根配置扫描到的模块中的组件会自动注册为 Bean。
///
/// 类型必须实现 `Default`（容器通过默认构造创建零值实例）。
///
/// 用法：
/// ```ignore
/// #[derive(Component, Default)]
/// #[component("userService")]         // 可选：指定bean名称（简写形式）
/// // 或
/// #[component(name = "userService")]  // 可选：指定bean名称（完整形式）
/// #[scope("prototype")]               // 可选：指定作用域 (singleton/prototype)
/// #[lazy]                             // 可选：延迟初始化
/// #[bean_name_aware]                  // 可选：类型实现了 BeanNameAware
/// #[initializing_bean]                // 可选：类型实现了 InitializingBean
/// struct UserService {
///     #[autowired]                    // 按字段名注入：order_service -> orderService
///     order_service: Option<Arc<OrderService>>,
///
///     #[autowired("auditLog")]        // 指定依赖的bean名称
///     audit: Option<Arc<AuditLog>>,
/// }
/// ```
///
/// 未指定名称时，扫描器使用类型名的 camelCase 形式（UserService -> userService）。
#[proc_macro_error]
#[proc_macro_derive(
    Component,
    attributes(component, scope, lazy, autowired, bean_name_aware, initializing_bean)
)]
pub fn derive_component(input: TokenStream) -> TokenStream {
    component_impl::derive_component_impl(input)
}

/// Configuration派生宏
///
/// 用于标记根配置类，声明组件扫描路径
///
/// 类似 Spring 的 @Configuration + @ComponentScan
///
/// # 用法
///
/// ```ignore
/// use maker_core::prelude::*;
/// use maker_core_macros::Configuration;
///
/// #[derive(Configuration)]
/// #[component_scan("app::service")]  // 扫描 app::service 及其子模块
/// pub struct AppConfig;
///
/// // 不带参数时扫描声明所在的模块
/// #[derive(Configuration)]
/// #[component_scan]
/// pub struct LocalConfig;
///
/// let container = Container::new(&AppConfig)?;
/// ```
///
/// 包路径可以写成 `app::service` 或 `app.service`。
#[proc_macro_error]
#[proc_macro_derive(Configuration, attributes(component_scan))]
pub fn derive_configuration(input: TokenStream) -> TokenStream {
    configuration_impl::derive_configuration_impl(input)
}
