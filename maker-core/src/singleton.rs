//! 单例缓存

use std::collections::HashMap;

use parking_lot::{ReentrantMutex, RwLock};

use crate::descriptor::SharedBean;

/// Bean 名称到单例实例的映射
///
/// 每个名称只写入一次，容器存活期间从不淘汰。读路径只需要读锁；
/// 创建路径由 `creation_lock` 串行化，同一名称最多只会构建一次。
/// 该锁可重入，创建过程中递归解析依赖时同一线程可以再次进入。
pub struct SingletonCache {
    singletons: RwLock<HashMap<String, SharedBean>>,
    creation_lock: ReentrantMutex<()>,
}

impl SingletonCache {
    pub fn new() -> Self {
        Self {
            singletons: RwLock::new(HashMap::new()),
            creation_lock: ReentrantMutex::new(()),
        }
    }

    pub fn get(&self, name: &str) -> Option<SharedBean> {
        self.singletons.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.singletons.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.singletons.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.singletons.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.singletons.read().keys().cloned().collect()
    }

    /// 写入单例；名称已存在时保留先写入的实例并返回它
    pub fn insert(&self, name: &str, bean: SharedBean) -> SharedBean {
        let mut singletons = self.singletons.write();
        if let Some(existing) = singletons.get(name) {
            tracing::warn!(
                "Singleton '{}' already cached, keeping the first instance",
                name
            );
            return existing.clone();
        }
        singletons.insert(name.to_string(), bean.clone());
        bean
    }

    /// 取出缓存的单例，未命中时在创建锁内调用 `create`
    ///
    /// 拿到锁后会再次检查缓存，并发的首次调用只有一个会真正执行 `create`。
    /// `create` 失败时不写入任何内容。
    pub fn get_or_create<E, F>(&self, name: &str, create: F) -> Result<SharedBean, E>
    where
        F: FnOnce() -> Result<SharedBean, E>,
    {
        if let Some(bean) = self.get(name) {
            return Ok(bean);
        }

        let _guard = self.creation_lock.lock();

        if let Some(bean) = self.get(name) {
            tracing::debug!("Singleton '{}' was created while waiting for the lock", name);
            return Ok(bean);
        }

        let bean = create()?;
        Ok(self.insert(name, bean))
    }
}

impl Default for SingletonCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SingletonCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonCache")
            .field("names", &self.names())
            .finish()
    }
}
