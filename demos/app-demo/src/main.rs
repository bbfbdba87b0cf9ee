use std::sync::Arc;

use maker_core::prelude::*;
use maker_core_macros::Configuration;

// ==================== 根配置 ====================

/// 扫描 service 模块中的组件
#[derive(Configuration)]
#[component_scan("app_demo::service")]
struct AppConfig;

// ==================== 业务服务 ====================

mod service {
    use std::sync::Arc;

    use maker_core::prelude::*;
    use maker_core_macros::Component;

    /// 订单服务 - 启动时创建
    #[derive(Component, Default, Debug)]
    #[component("orderService")]
    #[initializing_bean]
    pub struct OrderService {
        catalog: Vec<String>,
    }

    impl OrderService {
        pub fn order_count(&self) -> usize {
            self.catalog.len()
        }
    }

    impl InitializingBean for OrderService {
        fn after_properties_set(&mut self) -> anyhow::Result<()> {
            self.catalog = vec!["book".to_string(), "pen".to_string()];
            tracing::info!("OrderService loaded {} catalog item(s)", self.catalog.len());
            Ok(())
        }
    }

    /// 用户服务 - 首次获取时创建，注入 orderService
    #[derive(Component, Default)]
    #[component("userService")]
    #[lazy]
    #[bean_name_aware]
    pub struct UserService {
        #[autowired]
        order_service: Option<Arc<OrderService>>,

        bean_name: String,
    }

    impl BeanNameAware for UserService {
        fn set_bean_name(&mut self, name: &str) {
            self.bean_name = name.to_string();
        }
    }

    impl UserService {
        pub fn describe(&self) -> String {
            let orders = self
                .order_service
                .as_ref()
                .map(|service| service.order_count())
                .unwrap_or_default();
            format!("{} (orderService sees {} item(s))", self.bean_name, orders)
        }
    }
}

// 调试用：打印每个 Bean 的初始化
struct TracingPostProcessor;

impl BeanPostProcessor for TracingPostProcessor {
    fn post_process_after_initialization(
        &self,
        _bean: &mut dyn Instance,
        bean_name: &str,
    ) -> anyhow::Result<()> {
        tracing::debug!("Bean '{}' is ready", bean_name);
        Ok(())
    }

    fn name(&self) -> &str {
        "TracingPostProcessor"
    }
}

fn main() -> anyhow::Result<()> {
    let container = MakerApplication::new("app-demo")
        .post_processor(Arc::new(TracingPostProcessor))
        .run(&AppConfig)?;

    for _ in 0..3 {
        let user = container.get_bean_typed::<service::UserService>("userService")?;
        println!("{:p} {}", Arc::as_ptr(&user), user.describe());
    }

    Ok(())
}
