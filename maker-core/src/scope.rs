use std::fmt;
use std::str::FromStr;

/// Bean 的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// 单例模式 - 容器中只有一个实例
    #[default]
    Singleton,

    /// 原型模式 - 每次请求都创建新实例
    Prototype,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Singleton => "singleton",
            Scope::Prototype => "prototype",
        }
    }
}

/// 作用域标记值解析：忽略大小写与首尾空白，其余取值一律拒绝
impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singleton" => Ok(Scope::Singleton),
            "prototype" => Ok(Scope::Prototype),
            _ => Err(format!("Invalid scope: {}", s)),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
