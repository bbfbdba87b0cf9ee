//! 单元测试用的手写描述符

use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::descriptor::{
    unknown_field, Annotated, Annotation, InjectionPoint, Instance, SharedBean, TypeDescriptor,
};
use crate::lifecycle::{BeanNameAware, InitializingBean};

/// 根配置
pub(crate) struct TestRoot(pub Option<&'static str>);

impl Annotated for TestRoot {
    fn type_name(&self) -> &str {
        "TestRoot"
    }

    fn annotations(&self) -> Vec<Annotation> {
        self.0
            .map(|path| vec![Annotation::ComponentScan(path.to_string())])
            .unwrap_or_default()
    }
}

pub(crate) struct TestDescriptor {
    type_name: String,
    annotations: Vec<Annotation>,
    injections: Vec<InjectionPoint>,
    aware: bool,
    initializing: bool,
    fail_instantiate: bool,
    fail_init: Arc<AtomicBool>,
    instantiations: Arc<AtomicUsize>,
}

impl TestDescriptor {
    /// 带组件标记的描述符
    pub(crate) fn new(name: &str) -> Self {
        Self::plain(name).annotate(Annotation::Component(name.to_string()))
    }

    /// 不带任何标记的描述符
    pub(crate) fn plain(name: &str) -> Self {
        Self {
            type_name: format!("TestBean<{}>", name),
            annotations: Vec::new(),
            injections: Vec::new(),
            aware: false,
            initializing: false,
            fail_instantiate: false,
            fail_init: Arc::new(AtomicBool::new(false)),
            instantiations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub(crate) fn scope(self, value: &str) -> Self {
        self.annotate(Annotation::Scope(value.to_string()))
    }

    pub(crate) fn lazy(self) -> Self {
        self.annotate(Annotation::Lazy)
    }

    pub(crate) fn inject(mut self, field: &'static str, bean_name: &str) -> Self {
        self.injections.push(InjectionPoint::new(field, bean_name));
        self
    }

    pub(crate) fn aware(mut self) -> Self {
        self.aware = true;
        self
    }

    pub(crate) fn initializing(mut self) -> Self {
        self.initializing = true;
        self
    }

    pub(crate) fn failing_instantiation(mut self) -> Self {
        self.fail_instantiate = true;
        self
    }

    /// 初始化是否失败由外部开关控制
    pub(crate) fn init_switch(mut self, fail_init: Arc<AtomicBool>) -> Self {
        self.initializing = true;
        self.fail_init = fail_init;
        self
    }

    pub(crate) fn instantiation_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.instantiations)
    }

    pub(crate) fn shared(self) -> Arc<dyn TypeDescriptor> {
        Arc::new(self)
    }
}

impl Annotated for TestDescriptor {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn annotations(&self) -> Vec<Annotation> {
        self.annotations.clone()
    }
}

impl TypeDescriptor for TestDescriptor {
    fn injection_points(&self) -> Vec<InjectionPoint> {
        self.injections.clone()
    }

    fn instantiate(&self) -> anyhow::Result<Box<dyn Instance>> {
        if self.fail_instantiate {
            anyhow::bail!("no accessible default constructor");
        }
        self.instantiations.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TestBean {
            type_name: self.type_name.clone(),
            fields: self.injections.iter().map(|p| p.field).collect(),
            injected: HashMap::new(),
            bean_name: None,
            aware: self.aware,
            initializing: self.initializing,
            fail_init: Arc::clone(&self.fail_init),
            events: Vec::new(),
        }))
    }
}

/// 测试 Bean：记录注入结果与回调顺序
pub(crate) struct TestBean {
    type_name: String,
    fields: Vec<&'static str>,
    pub(crate) injected: HashMap<&'static str, SharedBean>,
    pub(crate) bean_name: Option<String>,
    aware: bool,
    initializing: bool,
    fail_init: Arc<AtomicBool>,
    pub(crate) events: Vec<String>,
}

impl TestBean {
    pub(crate) fn dependency(&self, field: &str) -> Option<&SharedBean> {
        self.injected.get(field)
    }
}

impl BeanNameAware for TestBean {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = Some(name.to_string());
        self.events.push("set_bean_name".to_string());
    }
}

impl InitializingBean for TestBean {
    fn after_properties_set(&mut self) -> anyhow::Result<()> {
        self.events.push("after_properties_set".to_string());
        if self.fail_init.load(Ordering::SeqCst) {
            anyhow::bail!("post-construct check failed");
        }
        Ok(())
    }
}

impl Instance for TestBean {
    fn set_field(&mut self, field: &str, value: SharedBean) -> anyhow::Result<()> {
        let slot = self
            .fields
            .iter()
            .copied()
            .find(|f| *f == field)
            .ok_or_else(|| unknown_field(&self.type_name, field))?;
        self.injected.insert(slot, value);
        self.events.push(format!("set_field:{}", field));
        Ok(())
    }

    fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
        if self.aware {
            Some(self)
        } else {
            None
        }
    }

    fn as_initializing_bean(&mut self) -> Option<&mut dyn InitializingBean> {
        if self.initializing {
            Some(self)
        } else {
            None
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_shared(self: Box<Self>) -> SharedBean {
        Arc::new(*self)
    }
}
