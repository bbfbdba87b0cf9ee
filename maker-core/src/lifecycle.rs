//! 生命周期回调与扩展点

use crate::descriptor::Instance;

/// Bean 名称回调
///
/// 属性填充完成后，容器把扫描时登记的名称告诉 Bean。
pub trait BeanNameAware {
    fn set_bean_name(&mut self, name: &str);
}

/// 初始化回调（类似 Spring 的 afterPropertiesSet）
///
/// 返回错误会中止创建，实例被丢弃且不会进入单例缓存。
pub trait InitializingBean {
    fn after_properties_set(&mut self) -> anyhow::Result<()>;
}

/// BeanPostProcessor trait
///
/// 在 `InitializingBean` 回调前后提供钩子，按 `order()` 升序执行。
/// 默认不注册任何处理器。
///
/// # 示例
///
/// ```ignore
/// struct LoggingPostProcessor;
///
/// impl BeanPostProcessor for LoggingPostProcessor {
///     fn post_process_before_initialization(
///         &self,
///         _bean: &mut dyn Instance,
///         bean_name: &str,
///     ) -> anyhow::Result<()> {
///         tracing::info!("Before initialization: {}", bean_name);
///         Ok(())
///     }
/// }
/// ```
pub trait BeanPostProcessor: Send + Sync {
    /// 在初始化回调之前调用
    fn post_process_before_initialization(
        &self,
        _bean: &mut dyn Instance,
        _bean_name: &str,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// 在初始化回调之后调用
    fn post_process_after_initialization(
        &self,
        _bean: &mut dyn Instance,
        _bean_name: &str,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// 获取处理器的名称（用于日志和调试）
    fn name(&self) -> &str {
        "BeanPostProcessor"
    }

    /// 获取处理器的优先级（数字越小优先级越高）
    fn order(&self) -> i32 {
        1000
    }
}
