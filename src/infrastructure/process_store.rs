//! 进程环境变量存储

use crate::domain::repositories::EnvStore;
use std::collections::HashMap;
use std::env::{self, VarError};
use tracing::warn;

/// 直接读取当前进程的环境变量
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessStore;

impl ProcessStore {
    /// 当前进程环境的快照
    pub fn snapshot() -> MemoryStore {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

impl EnvStore for ProcessStore {
    fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(key, "环境变量不是有效的 Unicode，按缺失处理");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

/// 内存中的键值存储
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    vars: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// 以 `top` 覆盖同名条目
    #[must_use]
    pub fn overlay(mut self, top: MemoryStore) -> Self {
        self.vars.extend(top.vars);
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
